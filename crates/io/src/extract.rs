// Extract-table ingestion: header-keyed, all-string rows

use std::io::Read;
use std::path::Path;

use crosscheck_engine::ExtractRow;

/// Read an extract table from a file: UTF-8 with a Windows-1252 fallback,
/// delimiter sniffed over comma/semicolon/tab.
pub fn read_extract_file(path: &Path) -> Result<Vec<ExtractRow>, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    read_extract(&content, delimiter)
}

/// Parse extract rows from CSV text with an explicit delimiter. Every cell
/// stays a string; ragged rows are tolerated (short rows read as empty in
/// the missing columns).
pub fn read_extract(data: &str, delimiter: u8) -> Result<Vec<ExtractRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("CSV header error: {e}"))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("CSV parse error at row {}: {e}", i + 1))?;
        let fields = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(ExtractRow::new(fields));
    }

    Ok(rows)
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are
/// commonly Windows-1252).
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file =
        std::fs::File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by consistency across the first
/// few lines: the candidate splitting line 1 into more than one field and
/// holding that field count across the sample wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for delim in [b',', b';', b'\t'] {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| line.matches(delim as char).count() + 1)
            .collect();

        let target = counts[0];
        if target <= 1 {
            continue;
        }

        // Higher field count breaks ties between equally consistent candidates
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}
