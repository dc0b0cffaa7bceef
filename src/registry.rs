//! Caller-owned collection of generated objects.
//!
//! The generator only ever appends; ordering is the order of successful
//! [`crate::Generator::install`] calls. Concurrent use is the owner's concern.

use crate::resource::DynamicObject;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: Vec<DynamicObject>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: DynamicObject) {
        self.objects.push(object);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_vec(self) -> Vec<DynamicObject> {
        self.objects
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a DynamicObject;
    type IntoIter = std::slice::Iter<'a, DynamicObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
