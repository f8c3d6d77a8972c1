use std::path::Path;

use countrypaths::{ser::parse_module, Config, Error, RegionSet};

const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="countries">
    <path class="sm_state sm_state_US" d="M9 9"/>
    <path class="sm_state sm_state_FR border" d="M0 0 L1 1"/>
    <path class="sea"/>
    <g>
      <path class="sm_state_SA" d="M2 2 L3 3 Z"/>
    </g>
    <path class="sm_state sm_state_DE" d="M4 4"/>
  </g>
</svg>"#;

fn config(dir: &Path, svg: &str) -> Config {
    let input = dir.join("europe.svg");
    std::fs::write(&input, svg).unwrap();
    Config {
        input,
        output: dir.join("countries.js"),
        ..Config::default()
    }
}

#[test]
fn writes_selected_paths_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), MAP);

    assert_eq!(countrypaths::run(&config).unwrap(), 3);

    let module = std::fs::read_to_string(&config.output).unwrap();
    let paths = parse_module("COUNTRIES", &module).unwrap();
    let found: Vec<_> = paths.iter().map(|r| (r.code.as_str(), r.d.as_str())).collect();
    assert_eq!(
        found,
        vec![("FR", "M0 0 L1 1"), ("SA", "M2 2 L3 3 Z"), ("DE", "M4 4")]
    );
    assert!(paths.iter().all(|r| config.regions.contains(&r.code)));
}

#[test]
fn no_matches_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path(),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path class="sm_state_US" d="M0 0"/></svg>"#,
    );

    assert_eq!(countrypaths::run(&config).unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(&config.output).unwrap(),
        "export const COUNTRIES = [];"
    );
}

#[test]
fn extract_matches_single_record() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path class="sm_state_FR border" d="M0 0 L1 1"/></svg>"#;
    let paths = countrypaths::extract(svg, &RegionSet::selected()).unwrap();
    assert_eq!(paths.len(), 1);

    let module = countrypaths::ser::render_module("COUNTRIES", &paths).unwrap();
    assert_eq!(
        module,
        "export const COUNTRIES = [\n  {\n    \"code\": \"FR\",\n    \"d\": \"M0 0 L1 1\"\n  }\n];"
    );
}

#[test]
fn written_module_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), MAP);
    countrypaths::run(&config).unwrap();

    let module = std::fs::read_to_string(&config.output).unwrap();
    let parsed = parse_module(&config.constant, &module).unwrap();
    assert_eq!(
        countrypaths::ser::render_module(&config.constant, &parsed).unwrap(),
        module
    );
}

#[test]
fn missing_d_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path(),
        r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path class="sm_state_FR" d="M0 0"/>
  <path class="sm_state_IT"/>
</svg>"#,
    );
    std::fs::write(&config.output, "export const COUNTRIES = [\"old\"];").unwrap();

    let err = countrypaths::run(&config).unwrap_err();
    assert!(
        matches!(&err, Error::MissingAttribute { code, row: 3, .. } if code.as_str() == "IT"),
        "{err:?}"
    );
    assert_eq!(
        std::fs::read_to_string(&config.output).unwrap(),
        "export const COUNTRIES = [\"old\"];"
    );
}

#[test]
fn failed_run_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "<svg><path></svg>");

    assert!(matches!(countrypaths::run(&config), Err(Error::Parse(_))));
    assert!(!config.output.exists());
    // the temporary file is only created once rendering succeeded
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("nope.svg"),
        output: dir.path().join("countries.js"),
        ..Config::default()
    };

    assert!(matches!(countrypaths::run(&config), Err(Error::Read { .. })));
    assert!(!config.output.exists());
}

#[test]
fn unwritable_output_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), MAP);
    config.output = dir.path().join("missing").join("countries.js");

    assert!(matches!(countrypaths::run(&config), Err(Error::Write { .. })));
}

#[test]
fn large_map_reports_position_of_last_path() {
    let mut svg = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\">\n");
    let d = "L1 1 ".repeat(200);
    for _ in 0..3000 {
        svg.push_str(&format!("<path class=\"sm_state_PL\" d=\"M0 0 {d}\"/>\n"));
    }
    svg.push_str("<path class=\"sm_state_PL\"/>\n</svg>");

    let err = countrypaths::extract(&svg, &RegionSet::selected()).unwrap_err();
    assert!(
        matches!(&err, Error::MissingAttribute { row: 3002, col: 1, .. }),
        "{err:?}"
    );
}
