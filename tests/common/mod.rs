//! Shared test utilities for pcb2dxf integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use pcb2dxf::io::dxf::{write_r12, R12Writer};
use pcb2dxf::Result;

/// Resolve a file in `tests/data/`.
pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(filename)
}

/// Run `body` against an in-memory drawing and return the full text.
pub fn render<F>(body: F) -> String
where
    F: FnOnce(&mut R12Writer<Vec<u8>>) -> Result<()>,
{
    let bytes = write_r12(Vec::new(), false, body).expect("drawing should be written");
    String::from_utf8(bytes).expect("DXF output is UTF-8")
}

/// Split DXF text into (group code, value) pairs.
pub fn group_pairs(output: &str) -> Vec<(i32, String)> {
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines.len() % 2 == 0, "odd number of DXF lines");
    lines
        .chunks(2)
        .map(|pair| {
            let code = pair[0].trim().parse().expect("group code is an integer");
            (code, pair[1].to_string())
        })
        .collect()
}

/// Group the pairs of the ENTITIES section into one list per entity,
/// starting at each code 0 record.
pub fn entities(output: &str) -> Vec<Vec<(i32, String)>> {
    let pairs = group_pairs(output);
    let start = pairs
        .iter()
        .position(|(code, value)| *code == 2 && value == "ENTITIES")
        .expect("ENTITIES section present");

    let mut result: Vec<Vec<(i32, String)>> = Vec::new();
    for (code, value) in pairs.into_iter().skip(start + 1) {
        if code == 0 {
            if value == "ENDSEC" {
                break;
            }
            result.push(Vec::new());
        }
        if let Some(current) = result.last_mut() {
            current.push((code, value));
        }
    }
    result
}

/// Entities of one type
pub fn entities_of_type(output: &str, entity_type: &str) -> Vec<Vec<(i32, String)>> {
    entities(output)
        .into_iter()
        .filter(|entity| entity[0].1 == entity_type)
        .collect()
}

/// Value of the first occurrence of `code` in an entity
pub fn value(entity: &[(i32, String)], code: i32) -> Option<&str> {
    entity
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, v)| v.as_str())
}

/// Assert the output is closed by the section footer and EOF marker.
pub fn assert_terminated(output: &str) {
    assert!(
        output.ends_with("0\nENDSEC\n0\nEOF\n"),
        "output is not terminated"
    );
}
