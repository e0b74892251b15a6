//! Human-readable report for terminal output.
//!
//! ```text
//! Group 1: 4 B x 2 files
//!   [DIR1] a/a.txt
//!   [DIR2] b/c.txt
//!
//! 1 duplicate group, 1 duplicate file, 4 B reclaimable (5 files scanned in 3ms)
//! ```

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Plain text output formatter.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextOutput<'a> {
    /// Create a new text output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Write one block per group followed by a summary line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (idx, group) in self.groups.iter().enumerate() {
            writeln!(
                writer,
                "Group {}: {} x {} files",
                idx + 1,
                ByteSize::b(group.size),
                group.len()
            )?;
            for (member, path) in group.files.iter().enumerate() {
                let tree = if member < group.first_tree { "DIR1" } else { "DIR2" };
                writeln!(writer, "  [{}] {}", tree, path.display())?;
            }
            writeln!(writer)?;
        }

        if self.groups.is_empty() {
            writeln!(writer, "No duplicates found.")?;
        }

        writeln!(
            writer,
            "{} duplicate {}, {} duplicate {}, {} reclaimable ({} files, {} scanned in {:.0?})",
            self.summary.duplicate_groups,
            plural(self.summary.duplicate_groups, "group", "groups"),
            self.summary.duplicate_files,
            plural(self.summary.duplicate_files, "file", "files"),
            self.summary.reclaimable_display(),
            self.summary.total_files(),
            self.summary.total_size_display(),
            self.summary.scan_duration
        )
    }

    /// Render the report as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
