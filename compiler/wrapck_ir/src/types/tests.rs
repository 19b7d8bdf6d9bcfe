use super::*;

#[test]
fn preinterned_ids() {
    let mut types = TypeTable::new();
    assert_eq!(types.intern(TypeData::Invalid), TypeId::INVALID);
    assert_eq!(types.intern(TypeData::Error), TypeId::ERROR);
    assert_eq!(types.len(), 2);
}

#[test]
fn error_is_exact() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let my_err = types.intern(TypeData::Named {
        name: interner.intern("MyErr"),
        underlying: TypeId::ERROR,
    });
    assert!(types.is_error(TypeId::ERROR));
    assert!(!types.is_error(my_err));
    assert!(!types.is_error(TypeId::INVALID));
}

#[test]
fn interface_through_named() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let iface = types.intern(TypeData::Interface {
        methods: vec![interner.intern("A")],
    });
    let aer = types.intern(TypeData::Named {
        name: interner.intern("a.Aer"),
        underlying: iface,
    });
    let underlying = types_struct(&mut types);
    let strukt = types.intern(TypeData::Named {
        name: interner.intern("a.As"),
        underlying,
    });
    assert!(types.is_interface(aer));
    assert!(types.is_interface(TypeId::ERROR));
    assert!(!types.is_interface(strukt));
    assert!(!types.is_interface(TypeId::INVALID));
}

fn types_struct(types: &mut TypeTable) -> TypeId {
    types.intern(TypeData::Struct)
}

#[test]
fn cyclic_named_chain_terminates() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    // A named type whose underlying id points at itself (malformed input).
    let self_ref = types.intern(TypeData::Named {
        name: interner.intern("Loop"),
        underlying: TypeId(2),
    });
    assert_eq!(self_ref, TypeId(2));
    assert_eq!(types.underlying(self_ref), TypeId::INVALID);
    assert!(!types.is_interface(self_ref));
}

#[test]
fn tuple_positions() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let bytes = types.intern(TypeData::Basic(interner.intern("[]byte")));
    let tuple = types.results_type(&[bytes, TypeId::ERROR]);
    assert_eq!(types.tuple_error_positions(tuple), vec![1]);
    assert!(types.tuple_error_positions(TypeId::ERROR).is_empty());
}

#[test]
fn results_type_shapes() {
    let mut types = TypeTable::new();
    assert_eq!(types.results_type(&[]), TypeId::INVALID);
    assert_eq!(types.results_type(&[TypeId::ERROR]), TypeId::ERROR);
    let pair = types.results_type(&[TypeId::ERROR, TypeId::ERROR]);
    assert_eq!(types.results_type(&[TypeId::ERROR, TypeId::ERROR]), pair);
}

#[test]
fn display_types() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let int = types.intern(TypeData::Basic(interner.intern("int")));
    let ptr = types.intern(TypeData::Pointer(int));
    let tuple = types.results_type(&[ptr, TypeId::ERROR]);
    assert_eq!(types.display(tuple, &interner), "(*int, error)");
    assert_eq!(types.display(TypeId::INVALID, &interner), "invalid type");
}
