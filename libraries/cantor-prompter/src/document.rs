/// Teleprompter document model
///
/// A setlist's resolved songs flattened into one continuous scroll: each
/// song contributes a heading line followed by its lyric lines, with a
/// blank separator line between songs. The heading line numbers drive
/// seek-by-song.
use cantor_core::types::{Song, SongId};

/// One song's position inside the flattened sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// The song this entry belongs to
    pub song_id: SongId,

    /// Heading text shown above the lyrics
    pub title: String,

    /// Line number of the heading within the sheet (0-based)
    pub heading_line: usize,
}

/// The flattened lyric sheet for a whole setlist
#[derive(Debug, Clone, Default)]
pub struct LyricSheet {
    lines: Vec<String>,
    entries: Vec<SheetEntry>,
}

impl LyricSheet {
    /// Flatten resolved songs, in the order given, into one sheet
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut lines = Vec::new();
        let mut entries = Vec::with_capacity(songs.len());

        for (i, song) in songs.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }

            entries.push(SheetEntry {
                song_id: song.id.clone(),
                title: song.title.clone(),
                heading_line: lines.len(),
            });
            lines.push(song.title.clone());
            lines.extend(song.lyrics.lines().map(str::to_string));
        }

        Self { lines, entries }
    }

    /// All lines of the sheet, headings and separators included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Per-song entries, in sheet order
    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    /// Total line count
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sheet has no content
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Fraction of the sheet above the given song's heading.
    ///
    /// This is a line-ratio approximation: it treats every line as equally
    /// tall, which is close enough in practice because the sheet is
    /// rendered in a single font size. `None` when the index is out of
    /// range or the sheet is empty.
    pub fn seek_ratio(&self, song_index: usize) -> Option<f32> {
        let entry = self.entries.get(song_index)?;
        if self.lines.is_empty() {
            return None;
        }
        Some(entry.heading_line as f32 / self.lines.len() as f32)
    }

    /// Scroll offset that brings the given song's heading into view
    pub fn seek_offset(&self, song_index: usize, content_height: f32) -> Option<f32> {
        Some(self.seek_ratio(song_index)? * content_height)
    }
}
