//! Page extraction into the output object graph.
//!
//! A [`PageCollector`] accumulates pages pulled from source documents into
//! one in-memory output document. Each pull renumbers the source's objects
//! into a disjoint id space, clones the requested page dictionaries, and
//! recursively copies every object they reference. Inheritable page-tree
//! attributes are materialized onto each extracted page, since the page
//! leaves its original tree behind.

use lopdf::dictionary;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

use crate::error::{AssemblyError, Result};

/// Page-tree attributes a page may inherit from its ancestors.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Accumulates extracted pages into a new output document.
pub struct PageCollector {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl PageCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            page_ids: Vec::new(),
        }
    }

    /// Number of pages collected so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Whether no pages have been collected.
    pub fn is_empty(&self) -> bool {
        self.page_ids.is_empty()
    }

    /// Pull the given 1-based pages out of `source`, in the order given.
    ///
    /// The source is renumbered into the collector's id space, so each call
    /// expects a freshly loaded document. `path` is used for error reporting
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::PageOutOfBounds`] if a requested page number
    /// exceeds the document's extent - out-of-range requests fail loudly
    /// here, they are never clamped or wrapped.
    pub fn append_pages(
        &mut self,
        source: &mut Document,
        path: &Path,
        pages: &[u32],
    ) -> Result<()> {
        source.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = source.max_id;

        let page_map = source.get_pages();

        for &page_no in pages {
            let page_id = *page_map
                .get(&page_no)
                .ok_or_else(|| AssemblyError::page_out_of_bounds(path.to_path_buf(), page_no))?;

            let mut dict = source
                .get_dictionary(page_id)
                .map_err(|e| AssemblyError::malformed(path.to_path_buf(), e.to_string()))?
                .clone();

            for key in INHERITABLE_KEYS {
                if dict.get(key).is_err()
                    && let Some(value) = inherited_attribute(source, &dict, key)
                {
                    dict.set(key, value);
                }
            }

            // The page leaves its source tree; finish() re-parents it.
            dict.remove(b"Parent");

            // The same source page may be pulled more than once (cover plus
            // regular selection); later occurrences get a fresh id.
            let out_id = if self.document.objects.contains_key(&page_id) {
                self.document.new_object_id()
            } else {
                page_id
            };

            copy_references(&mut self.document, source, &Object::Dictionary(dict.clone()));
            self.document.objects.insert(out_id, dict.into());
            self.page_ids.push(out_id);
        }

        Ok(())
    }

    /// Pull every page of `source`, first to last.
    pub fn append_all_pages(&mut self, source: &mut Document, path: &Path) -> Result<()> {
        let all: Vec<u32> = (1..=source.get_pages().len() as u32).collect();
        self.append_pages(source, path, &all)
    }

    /// Build the page tree and catalog around the collected pages.
    ///
    /// Consumes the collector; the returned document is ready to write.
    pub fn finish(mut self) -> Result<Document> {
        let pages_id = self.document.new_object_id();

        for &page_id in &self.page_ids {
            let page = self.document.get_object_mut(page_id).map_err(|e| {
                AssemblyError::malformed(Path::new("<output>").to_path_buf(), e.to_string())
            })?;

            if let Object::Dictionary(dict) = page {
                dict.set("Parent", Object::Reference(pages_id));
            } else {
                return Err(AssemblyError::malformed(
                    Path::new("<output>").to_path_buf(),
                    "collected page object is not a dictionary",
                ));
            }
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let pages_dict = lopdf::dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document.objects.insert(pages_id, pages_dict.into());

        let catalog_id = self.document.new_object_id();
        let catalog = lopdf::dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        self.document.objects.insert(catalog_id, catalog.into());
        self.document.trailer.set("Root", catalog_id);

        self.document.renumber_objects();

        Ok(self.document)
    }
}

impl Default for PageCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve an inheritable attribute by walking the source page tree upward.
fn inherited_attribute(source: &Document, dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut current = dict.clone();
    loop {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = source.get_dictionary(parent_id).ok()?.clone();
    }
}

/// Copy object references from one PDF document to another.
///
/// If `obj` is a reference, this walks the structure recursively and inserts
/// missing referenced objects into the `target` document. Required so that
/// every object an extracted page points at exists in the final document.
fn copy_references(target: &mut Document, source: &Document, obj: &Object) {
    match obj {
        Object::Reference(ref_id) => {
            if !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced_obj.clone());
                copy_references(target, source, referenced_obj);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                copy_references(target, source, value);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_references(target, source, item);
            }
        }
        Object::Stream(stream) => {
            copy_references(target, source, &Object::Dictionary(stream.dict.clone()));
        }
        _ => {}
    }
}
