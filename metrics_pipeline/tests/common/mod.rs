#![allow(dead_code)]

use std::path::Path;

use metrics_pipeline::MetricKind;

/// Write one metric CSV with the canonical header. Each row is
/// `(month, locality, bhk, asset, value, sample_size)`.
pub fn write_metric(dir: &Path, kind: MetricKind, rows: &[(&str, i64, &str, &str, &str, &str)]) {
    let mut text = kind.headers().join(",");
    text.push('\n');
    for (month, loc, bhk, asset, value, n) in rows {
        text.push_str(&format!("{month},13,100,{loc},{bhk},{asset},{value},1,{n},2025-07-15\n"));
    }
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(kind.file_name()), text).unwrap();
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Relative file paths under `root`, sorted, with `/` separators.
pub fn tree(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
                out.push(parts.join("/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

pub const DIMS_JSON: &str = r#"{
  "bhk": [{"code": "1", "label": "1 BHK"}, {"code": "2", "label": "2 BHK"}],
  "assets": [{"code": "Residential", "label": "Residential"}],
  "city": null,
  "micromarkets": [{"id": 100, "name": "Western Suburbs", "cityId": 13}],
  "localities": [
    {"id": 11, "name": "Andheri West", "cityId": 13, "microMarketId": 100, "microMarketName": "Western Suburbs"},
    {"id": 12, "name": "Bandra West", "cityId": 13, "microMarketId": 100, "microMarketName": "Western Suburbs"}
  ]
}"#;
