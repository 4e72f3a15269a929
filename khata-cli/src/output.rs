//! Render parsed partitions into output files. Rendering is pure and returns
//! `{path, content}` pairs; `write_all` is the only function that touches
//! the filesystem.

use anyhow::{Context, Result};
use khata_core::Transaction;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One output file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Serialize)]
struct Manifest<'a> {
    months: Vec<ManifestMonth<'a>>,
    total: usize,
}

#[derive(Serialize)]
struct ManifestMonth<'a> {
    key: &'a str,
    file: String,
    count: usize,
}

/// One `<YYYY-MM>.json` per partition plus `manifest.json`. Identical input
/// renders byte-identical output: partition keys arrive sorted and field
/// order is fixed.
pub fn render_partitions(
    partitions: &BTreeMap<String, Vec<Transaction>>,
) -> Result<Vec<RenderedFile>> {
    let mut files = Vec::with_capacity(partitions.len() + 1);
    let mut months = Vec::with_capacity(partitions.len());
    let mut total = 0;

    for (key, txns) in partitions {
        let file = format!("{key}.json");
        files.push(RenderedFile {
            path: PathBuf::from(&file),
            content: to_json(txns)?,
        });
        months.push(ManifestMonth {
            key,
            file,
            count: txns.len(),
        });
        total += txns.len();
    }

    files.push(RenderedFile {
        path: PathBuf::from("manifest.json"),
        content: to_json(&Manifest { months, total })?,
    });
    Ok(files)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(value).context("serialize output json")?;
    s.push('\n');
    Ok(s)
}

/// Flat CSV of the deduplicated set in document order, one header row.
pub fn render_csv(txns: &[Transaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "date",
        "bankName",
        "accountNumber",
        "category",
        "subcategory",
        "narration",
        "txnId",
        "amount",
        "type",
    ])?;
    for t in txns {
        wtr.write_record([
            t.date.format("%d-%m-%Y").to_string(),
            t.bank_name.clone(),
            t.account_number.clone(),
            t.category.as_str().to_string(),
            t.subcategory.clone(),
            t.narration.clone(),
            t.txn_id.clone(),
            format!("{:.2}", t.amount),
            t.kind.as_str().to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv writer: {e}"))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

/// The thin I/O shell: create the directory, write every rendered file.
pub fn write_all(out_dir: &Path, files: &[RenderedFile]) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    for f in files {
        let dest = out_dir.join(&f.path);
        fs::write(&dest, &f.content).with_context(|| format!("write {}", dest.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use khata_core::{Category, TxnType};

    fn txn(date: &str, txn_id: &str, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%d-%m-%Y").unwrap(),
            bank_name: "Kotak Mahindra Bank - XX 5999".to_string(),
            account_number: "5999".to_string(),
            category: Category::Shopping,
            subcategory: "Online Shopping".to_string(),
            narration: "eCOM/AMAZON PAY INDIA".to_string(),
            txn_id: txn_id.to_string(),
            amount,
            kind: TxnType::Debit,
        }
    }

    fn partitions() -> BTreeMap<String, Vec<Transaction>> {
        let mut p = BTreeMap::new();
        p.insert("2023-04".to_string(), vec![txn("23-04-2023", "S1", 1.0)]);
        p.insert(
            "2023-05".to_string(),
            vec![txn("03-05-2023", "S2", 2.0), txn("09-05-2023", "", 3.5)],
        );
        p
    }

    #[test]
    fn test_renders_month_files_then_manifest() {
        let files = render_partitions(&partitions()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("2023-04.json"),
                PathBuf::from("2023-05.json"),
                PathBuf::from("manifest.json"),
            ]
        );
    }

    #[test]
    fn test_month_file_contains_dashboard_field_names() {
        let files = render_partitions(&partitions()).unwrap();
        let april = &files[0].content;
        assert!(april.contains("\"date\": \"23-04-2023\""));
        assert!(april.contains("\"bankName\""));
        assert!(april.contains("\"txnId\": \"S1\""));
        assert!(april.contains("\"type\": \"debit\""));
    }

    #[test]
    fn test_manifest_totals_and_order() {
        let files = render_partitions(&partitions()).unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(&files.last().unwrap().content).unwrap();
        assert_eq!(manifest["total"], 3);
        assert_eq!(manifest["months"][0]["key"], "2023-04");
        assert_eq!(manifest["months"][0]["count"], 1);
        assert_eq!(manifest["months"][1]["file"], "2023-05.json");
        assert_eq!(manifest["months"][1]["count"], 2);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let p = partitions();
        let first = render_partitions(&p).unwrap();
        let second = render_partitions(&p).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_csv_rows_and_header() {
        let txns = vec![txn("23-04-2023", "S1", 1.0), txn("03-05-2023", "", 2.0)];
        let csv = render_csv(&txns).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,bankName,accountNumber"));
        assert!(lines[1].contains("23-04-2023"));
        assert!(lines[1].contains("1.00"));
        assert!(lines[1].contains("Online Shopping"));
        assert!(lines[2].contains(",,")); // empty txn id column
    }
}
