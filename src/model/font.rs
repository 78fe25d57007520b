/// A bitmap font as described by a `.fnt` text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub face: String,
    /// Image file name, relative to the `.fnt` file.
    pub page_file: String,
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub id: char,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}
