use std::fmt;

use crate::sort::SortReport;

impl fmt::Display for SortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();

        writeln!(f, "Summary:")?;
        writeln!(f, "Copied Photos ({} out of {}):", self.copied.len(), total)?;
        for p in &self.copied {
            writeln!(
                f,
                "  Photo: {} -> Folder: {}/{}",
                p.photo_name, p.folder_name, p.date_folder
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Skipped Photos ({} out of {}):", self.skipped.len(), total)?;
        for s in &self.skipped {
            writeln!(f, "  Photo: {} -> Reason: {}", s.photo_name, s.reason)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Already Exists ({} out of {}):",
            self.already_exists.len(),
            total
        )?;
        for p in &self.already_exists {
            writeln!(
                f,
                "  Photo: {} -> Reason: Already exists in {}/{}",
                p.photo_name, p.folder_name, p.date_folder
            )?;
        }

        Ok(())
    }
}
