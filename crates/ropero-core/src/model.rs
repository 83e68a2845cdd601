//! Canonical item model
//!
//! [`ClothingItem`] is the shape consumed by the UI layer. It carries the
//! store-assigned document id alongside the document fields; the remote
//! document itself (see [`crate::traits::item_store::ItemDocument`]) keeps
//! id and fields separate, the way the document store delivers them.

use serde::{Deserialize, Serialize};

use crate::traits::item_store::{ItemDocument, ItemFields};

/// A tracked clothing record
///
/// `id` is assigned by the remote store on creation and is empty before the
/// item has been persisted. `wear_count` starts at 0, is incremented by the
/// "use" action, and reset to 0 by the "wash" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Store-assigned document id (empty before persistence)
    pub id: String,
    /// Display name, non-empty
    pub name: String,
    /// Category label; the UI offers the fixed [`Category`] set but the
    /// store accepts any string
    pub category: String,
    /// URL of the uploaded photo (empty until upload succeeds)
    pub image_url: String,
    /// How many times the item has been worn since the last wash
    pub wear_count: u32,
}

impl ClothingItem {
    /// Build the canonical item shape from a remote document, assigning the
    /// store-provided id into the record
    pub fn from_document(document: ItemDocument) -> Self {
        Self {
            id: document.id,
            name: document.fields.name,
            category: document.fields.category,
            image_url: document.fields.image_url,
            wear_count: document.fields.wear_count,
        }
    }

    /// Extract the document fields (everything except the id)
    pub fn to_fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            wear_count: self.wear_count,
        }
    }
}

/// The fixed category choice set offered by the UI
///
/// Labels are the ones used by the remote collection since the first
/// release, so they are preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// "Saco"
    Jacket,
    /// "Chompa"
    Sweater,
    /// "Camiseta"
    Shirt,
    /// "Pantalón"
    Pants,
    /// "Otro"
    Other,
}

impl Category {
    /// All categories, in the order the UI presents them
    pub const ALL: [Category; 5] = [
        Category::Jacket,
        Category::Sweater,
        Category::Shirt,
        Category::Pants,
        Category::Other,
    ];

    /// The label stored in the remote collection
    pub fn label(&self) -> &'static str {
        match self {
            Category::Jacket => "Saco",
            Category::Sweater => "Chompa",
            Category::Shirt => "Camiseta",
            Category::Pants => "Pantalón",
            Category::Other => "Otro",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
