use crate::record::ProductRecord;
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// UTF-8 byte order mark, so spreadsheet tools pick up the accented headers
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes product records to a CSV file
///
/// One header row (the French column names, in fixed order), then one row
/// per record in collection order - nothing omitted, nothing reordered. An
/// empty record list writes no file at all and logs a warning instead.
pub fn write_products_csv(path: &Path, records: &[ProductRecord]) -> Result<()> {
    if records.is_empty() {
        tracing::warn!("No products to save, skipping {}", path.display());
        return Ok(());
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Builds the output path for one category's file
///
/// `{directory}/{prefix}_{slug}_{timestamp}.csv`, where the slug is the
/// lowercased category name with spaces replaced by underscores.
pub fn category_output_path(
    directory: &Path,
    prefix: &str,
    category_name: &str,
    timestamp: &str,
) -> PathBuf {
    let slug = category_name.to_lowercase().replace(' ', "_");
    directory.join(format!("{}_{}_{}.csv", prefix, slug, timestamp))
}

/// Builds the output path for the aggregate file covering every category
pub fn aggregate_output_path(directory: &Path, prefix: &str, timestamp: &str) -> PathBuf {
    directory.join(format!("{}_all_categories_{}.csv", prefix, timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_record(name: &str) -> ProductRecord {
        ProductRecord {
            category: "Jeux vidéo".to_string(),
            name: name.to_string(),
            price: "€ 59 99".to_string(),
            rating: "4,5 sur 5 étoiles".to_string(),
            reviews: "1 024".to_string(),
            link: "https://www.amazon.fr/dp/X".to_string(),
        }
    }

    #[test]
    fn test_written_file_has_bom_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![create_test_record("Manette"), create_test_record("Casque")];

        write_products_csv(&path, &records).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let content = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Catégorie,Nom du produit,Prix,Note,Nombre d'avis,Lien"
        );
        assert!(lines.next().unwrap().contains("Manette"));
        assert!(lines.next().unwrap().contains("Casque"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_records_write_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_products_csv(&path, &[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_category_output_path_slug() {
        let path = category_output_path(Path::new("data"), "amazon", "Jeux vidéo", "20250101_120000");
        assert_eq!(
            path,
            Path::new("data").join("amazon_jeux_vidéo_20250101_120000.csv")
        );
    }

    #[test]
    fn test_aggregate_output_path() {
        let path = aggregate_output_path(Path::new("data"), "amazon", "20250101_120000");
        assert_eq!(
            path,
            Path::new("data").join("amazon_all_categories_20250101_120000.csv")
        );
    }
}
