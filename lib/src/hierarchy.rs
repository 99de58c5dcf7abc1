//! Penn to NUPOS mapping and major-class siblings. Lookups fail open.

use hashbrown::HashMap;

use crate::error::LoadError;

#[derive(Clone, Debug, Default)]
pub struct TagHierarchy {
    /// Penn tag and its NUPOS expansion, in load order.
    penn_to_nupos: Vec<(String, Vec<String>)>,
    penn_index: HashMap<String, usize>,

    /// Major class name and its Penn members, in load order.
    major_classes: Vec<(String, Vec<String>)>,
    class_index: HashMap<String, usize>,
}

impl TagHierarchy {
    /// Builds the hierarchy, checking that every Penn tag placed in a major
    /// class also has a (possibly empty) NUPOS expansion.
    pub fn new(
        penn_to_nupos: Vec<(String, Vec<String>)>,
        major_classes: Vec<(String, Vec<String>)>,
    ) -> Result<Self, LoadError> {
        let mut penn_index = HashMap::with_capacity(penn_to_nupos.len());
        for (index, (penn, _)) in penn_to_nupos.iter().enumerate() {
            penn_index.entry(penn.clone()).or_insert(index);
        }

        let mut class_index = HashMap::new();
        for (index, (_, members)) in major_classes.iter().enumerate() {
            for member in members {
                if !penn_index.contains_key(member) {
                    return Err(LoadError::UnmappedPennTag(member.clone()));
                }
                class_index.entry(member.clone()).or_insert(index);
            }
        }

        Ok(Self {
            penn_to_nupos,
            penn_index,
            major_classes,
            class_index,
        })
    }

    /// All Penn tags with a NUPOS expansion.
    pub fn penn_tags(&self) -> impl Iterator<Item = &str> {
        self.penn_to_nupos.iter().map(|(penn, _)| penn.as_str())
    }

    /// NUPOS expansion of a Penn tag.
    pub fn nupos_for<'a>(&'a self, penn: &'a str) -> Vec<&'a str> {
        match self.penn_index.get(penn) {
            Some(&index) => self.penn_to_nupos[index]
                .1
                .iter()
                .map(String::as_str)
                .collect(),
            None => vec![penn],
        }
    }

    /// Penn tags whose expansion contains `nupos`, in table order.
    pub fn penn_for<'a>(&'a self, nupos: &'a str) -> Vec<&'a str> {
        let penn = self
            .penn_to_nupos
            .iter()
            .filter(|(_, expansion)| expansion.iter().any(|tag| tag == nupos))
            .map(|(penn, _)| penn.as_str())
            .collect::<Vec<_>>();

        if penn.is_empty() {
            vec![nupos]
        } else {
            penn
        }
    }

    /// Other Penn tags in the major class of `penn`.
    pub fn sibling_penn<'a>(&'a self, penn: &'a str) -> Vec<&'a str> {
        match self.class_index.get(penn) {
            Some(&index) => self.major_classes[index]
                .1
                .iter()
                .map(String::as_str)
                .filter(|&sibling| sibling != penn)
                .collect(),
            None => vec![penn],
        }
    }

    /// NUPOS expansions of every sibling of `penn`, flattened in order.
    pub fn sibling_nupos<'a>(&'a self, penn: &'a str) -> Vec<&'a str> {
        if !self.class_index.contains_key(penn) {
            return vec![penn];
        }

        self.sibling_penn(penn)
            .into_iter()
            .flat_map(|sibling| self.nupos_for(sibling))
            .collect()
    }

    /// Name of the major class containing `penn`.
    pub fn major_class(&self, penn: &str) -> Option<&str> {
        self.class_index
            .get(penn)
            .map(|&index| self.major_classes[index].0.as_str())
    }
}
