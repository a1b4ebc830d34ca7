use deopt_trace_studio::aggregator::{
    group_by_file, severity_histograms, total_severities, FileSeverities,
};
use deopt_trace_studio::parser::{
    parse_v8_log, BailoutType, DeoptEntry, IcEntry, IcState, IcType, LogEvent, Position, Severity,
};
use deopt_trace_studio::utils::ParseOptions;

fn ic(file: &str, line: u32, new_state: IcState, severity: Severity) -> LogEvent {
    LogEvent::Ic(IcEntry {
        position: Position::new(file, line, 1),
        ic_type: IcType::Load,
        old_state: IcState::Monomorphic,
        new_state,
        map: None,
        key: None,
        modifier: None,
        slow_reason: None,
        timestamp: u64::from(line),
        severity,
    })
}

fn deopt(file: &str, line: u32, bailout_type: BailoutType, severity: Severity) -> LogEvent {
    LogEvent::Deopt(DeoptEntry {
        position: Position::new(file, line, 1),
        function_name: "f".to_string(),
        bailout_type,
        deopt_reason: "wrong map".to_string(),
        inlining_chain: Vec::new(),
        timestamp: u64::from(line),
        severity,
    })
}

#[test]
fn test_grouping_keeps_per_file_order() {
    let events = vec![
        ic("/b.js", 1, IcState::Monomorphic, Severity::Low),
        ic("/a.js", 2, IcState::Polymorphic, Severity::Medium),
        ic("/b.js", 3, IcState::Megamorphic, Severity::High),
        deopt("", 4, BailoutType::Lazy, Severity::Medium),
    ];

    let grouped = group_by_file(events);

    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["", "/a.js", "/b.js"]);

    let lines: Vec<u32> = grouped["/b.js"].ics.iter().map(|e| e.position.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert_eq!(grouped[""].deopts.len(), 1);
}

#[test]
fn test_histograms_match_entry_counts() {
    let events = vec![
        ic("/a.js", 1, IcState::Monomorphic, Severity::Low),
        ic("/a.js", 2, IcState::Megamorphic, Severity::High),
        deopt("/a.js", 3, BailoutType::Eager, Severity::High),
        deopt("/b.js", 4, BailoutType::Soft, Severity::Low),
    ];
    let grouped = group_by_file(events);
    let histograms = severity_histograms(&grouped);

    assert_eq!(
        histograms["/a.js"],
        FileSeverities {
            codes: [0, 0, 0],
            deopts: [0, 0, 1],
            ics: [1, 0, 1],
        }
    );

    for (file, info) in &grouped {
        assert_eq!(histograms[file].total() as usize, info.len());
    }

    let total = total_severities(histograms.values());
    assert_eq!(total.total(), 4);
    assert_eq!(total.at(Severity::High), 2);
    assert_eq!(total.at(Severity::Medium), 0);
}

#[test]
fn test_histograms_of_parsed_log() {
    let log = "\
code-creation,LazyCompile,1,4,run /srv/app/main.js:1:1,~
LoadIC,2,4,3,5,0,1,0x1,a,,
LoadIC,3,4,3,5,1,P,0x2,a,,
StoreIC,4,4,7,2,P,G,0x3,b,,
code-deopt,5,4,9,1,lazy,run,,not a Smi
";
    let parsed = parse_v8_log(log, &ParseOptions::default());
    let histograms = severity_histograms(&parsed.files);
    let main = histograms["/srv/app/main.js"];

    assert_eq!(main.ics, [1, 1, 1]);
    assert_eq!(main.deopts, [0, 1, 0]);
    // interpreted only, never optimized
    assert_eq!(main.codes, [0, 0, 1]);
}

#[test]
fn test_empty_input_yields_empty_histograms() {
    let grouped = group_by_file(Vec::new());
    assert!(grouped.is_empty());
    assert!(severity_histograms(&grouped).is_empty());
    assert_eq!(total_severities(std::iter::empty()), FileSeverities::default());
}
