use deopt_trace_studio::output::{
    determine_common_root, generate_text_summary, read_report, write_data_script, write_report,
    DeoptReport,
};
use deopt_trace_studio::parser::parse_v8_log;
use deopt_trace_studio::utils::{ParseOptions, SCHEMA_VERSION, UNKNOWN_FILE_KEY};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LOG: &str = "\
script-details,1,/home/dev/app/src/index.js
script-details,2,/home/dev/app/src/lib/cache.js
code-creation,LazyCompile,10,1,main /home/dev/app/src/index.js:1:1,~
code-creation,LazyCompile,20,2,lookup /home/dev/app/src/lib/cache.js:12:3,*
KeyedLoadIC,30,2,14,9,P,N,0x10,,,
code-deopt,40,2,14,9,eager,lookup,,wrong map
LoadIC,50,42,1,1,0,1,0x11,x,,
";

fn report() -> DeoptReport {
    DeoptReport::from_parsed(parse_v8_log(LOG, &ParseOptions::default()))
}

#[test]
fn test_report_root_ignores_unknown_key() {
    let report = report();

    assert_eq!(report.version, SCHEMA_VERSION);
    assert_eq!(report.root, "/home/dev/app/src/");
    assert_eq!(report.files["/home/dev/app/src/lib/cache.js"].relative_path, "lib/cache.js");
    assert_eq!(report.files[UNKNOWN_FILE_KEY].relative_path, "");
}

#[test]
fn test_report_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("deopt.json");

    let report = report();
    write_report(&report, &path).unwrap();
    let loaded = read_report(&path).unwrap();

    assert_eq!(loaded, report);
    assert_eq!(loaded.entry_count(), 5);
}

#[test]
fn test_report_json_field_names() {
    let value = serde_json::to_value(report()).unwrap();
    let cache = &value["files"]["/home/dev/app/src/lib/cache.js"];

    assert_eq!(cache["relativePath"], "lib/cache.js");
    assert_eq!(cache["ics"][0]["icType"], "KeyedLoadIC");
    assert_eq!(cache["ics"][0]["newState"], "megamorphic");
    assert_eq!(cache["ics"][0]["severity"], 3);
    assert_eq!(cache["deopts"][0]["bailoutType"], "eager");
    assert_eq!(cache["deopts"][0]["file"], "/home/dev/app/src/lib/cache.js");
    assert_eq!(cache["severities"]["deopts"], serde_json::json!([0, 0, 1]));
    assert!(value["generatedAt"].is_string());
}

#[test]
fn test_data_script_wraps_files_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.js");

    write_data_script(&report(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    let body = text
        .strip_prefix("window.V8Data = ")
        .and_then(|rest| rest.trim_end().strip_suffix(';'))
        .expect("script should assign window.V8Data");
    let files: serde_json::Value = serde_json::from_str(body).unwrap();
    assert!(files.get("/home/dev/app/src/index.js").is_some());
    assert!(files.get(UNKNOWN_FILE_KEY).is_some());
}

#[test]
fn test_write_into_directory_fails() {
    let dir = TempDir::new().unwrap();
    assert!(write_report(&report(), dir.path()).is_err());
}

#[test]
fn test_summary_lists_worst_file_first() {
    let summary = generate_text_summary(&report(), 10);

    let cache = summary.find("lib/cache.js").expect("cache.js row");
    let index = summary.find("index.js").expect("index.js row");
    assert!(cache < index);
    assert!(summary.contains("Total"));
    assert!(!summary.contains("Showing top"));
}

#[test]
fn test_summary_truncates() {
    let summary = generate_text_summary(&report(), 1);
    assert!(summary.contains("(Showing top 1 of 3 files)"));
}

#[test]
fn test_common_root_without_shared_directory() {
    assert_eq!(determine_common_root(["/a/x.js", "/b/y.js"]), "/");
    assert_eq!(determine_common_root(["node:fs", "/b/y.js"]), "");
    assert_eq!(determine_common_root(std::iter::empty()), "");
}
