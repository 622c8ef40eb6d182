use corral_derive::model;
use corral_registry::Model;

#[model]
pub struct Critter {
    pub name: Option<String>,
    pub legs: Option<i64>,
}

fn main() {
    let critter = Critter::from_fields(&corral_registry::FieldMap::new());
    assert!(critter.name.is_none());
    assert_eq!(Critter::FIELDS.len(), 2);
}
