//! The structured types referenced by a module.
//!
//! Every class the emitter maps onto a struct type is interned here by
//! name, so all passes of a compile share one `TypeRef` per name. Where
//! the type lands in the type section is only known once the emitter
//! decides the output order, so its code starts out unassigned.
//!
//! The registry is a plain single-threaded table. A compiler that works
//! on several functions at once has to put it behind a lock so that
//! interning a name and placing a type are seen by every reader.
use std::collections::HashMap;
use std::fmt;

use la_arena::{Arena, Idx};
use thiserror::Error;

pub type TypeRef = Idx<StructType>;

#[derive(Debug)]
pub struct StructType {
    name: String,
    code: Option<u32>,
}

impl StructType {
    fn new(name: String) -> Self {
        StructType { name, code: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index in the type section, or None if not placed yet.
    pub fn code(&self) -> Option<u32> {
        self.code
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}", self.name)
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum TypeError {
    #[error("type `{name}` was never placed in the type section")]
    Unassigned { name: String },
    #[error("types `{first}` and `{second}` are both placed at index {code}")]
    DuplicateCode {
        code: u32,
        first: String,
        second: String,
    },
}

#[derive(Default, Debug)]
pub struct TypeRegistry {
    types: Arena<StructType>,
    by_name: HashMap<String, TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type interned for `name`, creating it on first use.
    pub fn value_of(&mut self, name: &str) -> TypeRef {
        if let Some(&ty) = self.by_name.get(name) {
            return ty;
        }
        let ty = self.types.alloc(StructType::new(name.to_owned()));
        self.by_name.insert(name.to_owned(), ty);
        debug!("interned struct type ${}", name);
        ty
    }

    /// Looks up a type without interning it.
    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.by_name.get(name).copied()
    }

    /// Places the type at index `id` of the type section.
    ///
    /// Nothing checks that ids are distinct; a later call overwrites an
    /// earlier one.
    pub fn use_type(&mut self, ty: TypeRef, id: u32) {
        let entry = &mut self.types[ty];
        match entry.code {
            Some(old) if old != id => warn!("struct type ${} moved from index {} to {}", entry.name, old, id),
            _ => debug!("struct type ${} placed at index {}", entry.name, id),
        }
        entry.code = Some(id);
    }

    pub fn code_of(&self, ty: TypeRef) -> Option<u32> {
        self.types[ty].code
    }

    pub fn struct_type(&self, ty: TypeRef) -> &StructType {
        &self.types[ty]
    }

    /// All interned types, in the order they were first looked up.
    /// This is not the order of their codes.
    pub fn all_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.types.iter().map(|(ty, _)| ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The types sorted by ascending code, ready for the type section.
    ///
    /// Fails if a type was never placed or two types share an index.
    pub fn emission_order(&self) -> Result<Vec<&StructType>, TypeError> {
        let mut placed: Vec<(u32, &StructType)> = Vec::with_capacity(self.types.len());
        for (_, ty) in self.types.iter() {
            match ty.code {
                Some(code) => placed.push((code, ty)),
                None => return Err(TypeError::Unassigned { name: ty.name.clone() }),
            }
        }
        placed.sort_by_key(|&(code, _)| code);

        for pair in placed.windows(2) {
            let (code, first) = pair[0];
            let (next, second) = pair[1];
            if code == next {
                return Err(TypeError::DuplicateCode {
                    code,
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }

        Ok(placed.into_iter().map(|(_, ty)| ty).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_interns() {
        let mut types = TypeRegistry::new();
        let a = types.value_of("java/lang/Object");
        let b = types.value_of("java/lang/String");
        assert_eq!(types.value_of("java/lang/Object"), a);
        assert_ne!(a, b);
        assert_eq!(types.struct_type(a).name(), "java/lang/Object");
        assert_eq!(types.struct_type(b).to_string(), "$java/lang/String");
    }

    #[test]
    fn test_cardinality() {
        let mut types = TypeRegistry::new();
        assert!(types.is_empty());
        for name in ["A", "B", "A", "C", "B", "D"].iter() {
            types.value_of(name);
        }
        assert_eq!(types.len(), 4);
        assert_eq!(types.all_types().count(), 4);
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut types = TypeRegistry::new();
        assert_eq!(types.get("A"), None);
        assert!(types.is_empty());
        let a = types.value_of("A");
        assert_eq!(types.get("A"), Some(a));
    }

    #[test]
    fn test_code_assignment() {
        let mut types = TypeRegistry::new();
        let t = types.value_of("A");
        assert_eq!(types.code_of(t), None);
        types.use_type(t, 7);
        assert_eq!(types.code_of(t), Some(7));
        assert_eq!(types.struct_type(t).code(), Some(7));

        // Last write wins.
        types.use_type(t, 2);
        assert_eq!(types.code_of(t), Some(2));
    }

    #[test]
    fn test_all_types_in_creation_order() {
        let mut types = TypeRegistry::new();
        let c = types.value_of("C");
        let a = types.value_of("A");
        let b = types.value_of("B");
        types.use_type(c, 2);
        types.use_type(a, 0);
        types.use_type(b, 1);

        assert_eq!(types.all_types().collect::<Vec<_>>(), vec![c, a, b]);

        let names: Vec<&str> = types.emission_order().unwrap().iter().map(|ty| ty.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_emission_order_rejects_unassigned() {
        let mut types = TypeRegistry::new();
        let a = types.value_of("A");
        types.value_of("B");
        types.use_type(a, 0);
        assert_eq!(types.emission_order().unwrap_err(), TypeError::Unassigned { name: "B".to_owned() });
    }

    #[test]
    fn test_emission_order_rejects_duplicates() {
        let mut types = TypeRegistry::new();
        let a = types.value_of("A");
        let b = types.value_of("B");
        types.use_type(a, 4);
        types.use_type(b, 4);
        assert_eq!(types.emission_order().unwrap_err(), TypeError::DuplicateCode {
            code: 4,
            first: "A".to_owned(),
            second: "B".to_owned(),
        });
    }

    #[test]
    fn test_emission_order_empty() {
        let types = TypeRegistry::new();
        assert!(types.emission_order().unwrap().is_empty());
    }
}
