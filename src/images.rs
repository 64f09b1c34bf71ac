//! Canonical product image lists.
//!
//! Product rows written by different generations of the catalog carry their
//! photos in different places: three discrete slots (`foto1..foto3`), a
//! JSON-encoded array in `imagens`, an already-structured array (client
//! payloads), or a single `imagem`. Everything outside this module only ever
//! sees the resolved, ordered list.

use serde_json::Value;

/// Writers never persist more than this many images per product.
pub const MAX_IMAGES: usize = 3;

/// Site-relative roots that client-supplied image paths may live under.
pub const PUBLIC_PREFIXES: &[&str] = &["/frontend", "/img/"];

/// Raw image-bearing fields of a stored row or a request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyImageFields {
    pub slots: [Option<Value>; 3],
    pub imagens: Option<Value>,
    pub imagem: Option<Value>,
}

impl LegacyImageFields {
    /// Build from stored text columns.
    pub fn from_columns(
        foto1: Option<&str>,
        foto2: Option<&str>,
        foto3: Option<&str>,
        imagens: Option<&str>,
        imagem: Option<&str>,
    ) -> Self {
        let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));
        Self {
            slots: [text(foto1), text(foto2), text(foto3)],
            imagens: text(imagens),
            imagem: text(imagem),
        }
    }
}

/// The tier an image list was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Slots(Vec<String>),
    JsonList(Vec<String>),
    StructuredList(Vec<String>),
    SingleLegacy(String),
    Empty,
}

impl ImageSource {
    /// Resolve using the read-path rule: any non-empty string is kept.
    pub fn resolve(fields: &LegacyImageFields) -> Self {
        Self::resolve_with(fields, |_| true)
    }

    /// Resolve using the write-path rule: entries must look like an image reference.
    pub fn submitted(fields: &LegacyImageFields) -> Self {
        Self::resolve_with(fields, is_acceptable_ref)
    }

    /// First tier yielding at least one accepted entry wins; tiers never merge.
    fn resolve_with(fields: &LegacyImageFields, accept: fn(&str) -> bool) -> Self {
        let slots: Vec<String> = fields
            .slots
            .iter()
            .filter_map(|slot| non_empty(slot.as_ref(), accept))
            .collect();
        if !slots.is_empty() {
            return ImageSource::Slots(slots);
        }

        match &fields.imagens {
            Some(Value::String(raw)) => {
                // Malformed JSON degrades to the next tier.
                if let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) {
                    let list = collect_strings(&entries, accept);
                    if !list.is_empty() {
                        return ImageSource::JsonList(list);
                    }
                }
            }
            Some(Value::Array(entries)) => {
                let list = collect_strings(entries, accept);
                if !list.is_empty() {
                    return ImageSource::StructuredList(list);
                }
            }
            _ => {}
        }

        match non_empty(fields.imagem.as_ref(), accept) {
            Some(single) => ImageSource::SingleLegacy(single),
            None => ImageSource::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ImageSource::Empty)
    }

    pub fn into_images(self) -> Vec<String> {
        match self {
            ImageSource::Slots(list)
            | ImageSource::JsonList(list)
            | ImageSource::StructuredList(list) => list,
            ImageSource::SingleLegacy(single) => vec![single],
            ImageSource::Empty => Vec::new(),
        }
    }
}

/// Canonical list for display. Never fails; may be empty.
pub fn normalize(fields: &LegacyImageFields) -> Vec<String> {
    ImageSource::resolve(fields).into_images()
}

/// Images for a newly created product: slots first, then any list, capped.
pub fn images_for_create(submitted: &LegacyImageFields) -> Vec<String> {
    cap(ImageSource::submitted(submitted).into_images())
}

/// Images for an update of a product currently holding `previous`.
///
/// Supplied slots replace only their own position; a supplied list replaces
/// the whole set; nothing usable keeps `previous` untouched.
pub fn images_for_update(submitted: &LegacyImageFields, previous: &[String]) -> Vec<String> {
    match ImageSource::submitted(submitted) {
        ImageSource::Empty => cap(previous.to_vec()),
        ImageSource::Slots(_) => {
            let mut merged: Vec<Option<String>> =
                (0..MAX_IMAGES).map(|i| previous.get(i).cloned()).collect();
            for (position, slot) in submitted.slots.iter().enumerate() {
                if let Some(image) = non_empty(slot.as_ref(), is_acceptable_ref) {
                    merged[position] = Some(image);
                }
            }
            merged.into_iter().flatten().collect()
        }
        other => cap(other.into_images()),
    }
}

pub fn cap(mut images: Vec<String>) -> Vec<String> {
    images.truncate(MAX_IMAGES);
    images
}

/// A data URI, an absolute URL, or a path under a public prefix.
pub fn is_acceptable_ref(candidate: &str) -> bool {
    let candidate = candidate.trim();
    candidate.starts_with("data:image/")
        || candidate.starts_with("http://")
        || candidate.starts_with("https://")
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| candidate.starts_with(prefix))
}

/// Column values written for a canonical list, so readers of any historical
/// shape keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImages {
    pub imagem: Option<String>,
    pub imagens: String,
    pub foto1: Option<String>,
    pub foto2: Option<String>,
    pub foto3: Option<String>,
}

impl StoredImages {
    pub fn from_canonical(images: &[String]) -> Self {
        let images = &images[..images.len().min(MAX_IMAGES)];
        let slot = |i: usize| images.get(i).cloned();
        Self {
            imagem: slot(0),
            imagens: serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string()),
            foto1: slot(0),
            foto2: slot(1),
            foto3: slot(2),
        }
    }
}

fn non_empty(value: Option<&Value>, accept: fn(&str) -> bool) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() && accept(s) => Some(s.clone()),
        _ => None,
    }
}

fn collect_strings(entries: &[Value], accept: fn(&str) -> bool) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| non_empty(Some(entry), accept))
        .collect()
}
