use serde::{Deserialize, Serialize};

use crate::model::{GridDims, Size};

#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub slug: &'static str,
    pub src: &'static str,
    pub width: u32,
    pub height: u32,
    pub fact: &'static str,
}

pub const FALLBACK_FACT: &str = "Well done! On to the next picture.";

pub const ROUND_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        label: "Northern Lights",
        slug: "aurora",
        src: "img/rounds/aurora.jpg",
        width: 1200,
        height: 1200,
        fact: "Auroras glow when charged particles from the Sun collide with gases high in the atmosphere.",
    },
    CatalogEntry {
        label: "Coral Reef",
        slug: "coral-reef",
        src: "img/rounds/coral-reef.jpg",
        width: 1200,
        height: 1200,
        fact: "Coral reefs cover less than one percent of the ocean floor yet shelter about a quarter of marine species.",
    },
    CatalogEntry {
        label: "Volcano",
        slug: "volcano",
        src: "img/rounds/volcano.jpg",
        width: 1200,
        height: 1200,
        fact: "Lava can leave a volcano at more than 1100 degrees Celsius.",
    },
    CatalogEntry {
        label: "Saturn",
        slug: "saturn",
        src: "img/rounds/saturn.jpg",
        width: 1200,
        height: 1200,
        fact: "Saturn's rings are mostly ice and stretch hundreds of thousands of kilometres, yet are often only ten metres thick.",
    },
];

/// One playable picture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundImage {
    pub label: String,
    pub slug: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl From<&CatalogEntry> for RoundImage {
    fn from(e: &CatalogEntry) -> Self {
        Self { label: e.label.into(), slug: e.slug.into(), src: e.src.into(), width: e.width, height: e.height }
    }
}

pub fn default_rounds() -> Vec<RoundImage> {
    ROUND_CATALOG.iter().map(RoundImage::from).collect()
}

pub fn entry_by_slug(slug: &str) -> Option<&'static CatalogEntry> {
    let trimmed = slug.trim();
    ROUND_CATALOG.iter().find(|e| e.slug.eq_ignore_ascii_case(trimmed))
}

/// The fact shown after a round, or a generic line for unknown pictures.
pub fn fact_for(slug: &str) -> &'static str {
    entry_by_slug(slug).map_or(FALLBACK_FACT, |e| e.fact)
}

/// CSS sprite geometry for fragment `index` (row-major) of an image diced
/// into `dims` pieces of `piece` size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub background_width: f64,
    pub background_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Fragment {
    pub fn of(index: usize, dims: GridDims, piece: Size) -> Self {
        let (row, col) = dims.row_col(index);
        Self {
            background_width: piece.width * dims.cols as f64,
            background_height: piece.height * dims.rows as f64,
            offset_x: -(col as f64) * piece.width,
            offset_y: -(row as f64) * piece.height,
        }
    }

    pub fn css(&self, src: &str) -> String {
        format!(
            "background-image:url('{}'); background-size:{:.1}px {:.1}px; background-position:{:.1}px {:.1}px;",
            src, self.background_width, self.background_height, self.offset_x, self.offset_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_fall_back_for_unknown_rounds() {
        assert!(fact_for("Volcano ").contains("Lava"));
        assert_eq!(fact_for("unknown"), FALLBACK_FACT);
    }

    #[test]
    fn catalog_slugs_are_unique() {
        let mut slugs: Vec<_> = ROUND_CATALOG.iter().map(|e| e.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), ROUND_CATALOG.len());
    }

    #[test]
    fn fragments_are_row_major_sprite_offsets() {
        let f = Fragment::of(3, GridDims::new(2, 2), Size::new(100.0, 80.0));
        assert_eq!(f.background_width, 200.0);
        assert_eq!(f.background_height, 160.0);
        assert_eq!((f.offset_x, f.offset_y), (-100.0, -80.0));
        let g = Fragment::of(2, GridDims::new(2, 3), Size::new(10.0, 10.0));
        assert_eq!((g.offset_x, g.offset_y), (-20.0, 0.0));
    }
}
