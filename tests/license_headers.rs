/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use std::{fs, path::Path};

const FULL_LICENSE_FILES: [&str; 4] = [
    "gesture.rs",
    "point_cloud_recognizer.rs",
    "point_cloud_recognizer_plus.rs",
    "q_point_cloud_recognizer.rs",
];

fn sources() -> Vec<(String, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    for dir in ["src", "tests"] {
        for entry in fs::read_dir(root.join(dir)).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|ext| ext == "rs") {
                let name = path.file_name().unwrap().to_string_lossy().into_owned();
                files.push((name, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    files
}

#[test]
fn license_headers_are_plain_block_comments() {
    for (name, text) in sources() {
        let first = text.lines().next().unwrap_or_default();
        // `/**` would turn the header into a doc comment on the first item
        assert_eq!(first, "/*", "{name}");
        let end = text.find("*/").unwrap();
        assert!(!text[..end].contains("/**"), "{name}");
    }
}

#[test]
fn only_recognizer_sources_carry_the_point_cloud_license() {
    let title = ["The $P", "Point-Cloud Recognizer (rust version)"].join(" ");
    for (name, text) in sources() {
        let full = text.contains(&title);
        assert_eq!(full, FULL_LICENSE_FILES.contains(&name.as_str()), "{name}");
    }
}
