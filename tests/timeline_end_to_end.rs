use std::fs;
use std::path::Path;

use forkline_lib::loader::{ColumnSchema, DataLoader, FEATURE_MATRIX_FILE};
use forkline_lib::render::{Timeline, TrackSet};
use forkline_lib::run_batch;
use forkline_lib::settings::ChartSettings;
use tempfile::TempDir;

const CODED: &[&str] = &[
    "Index\tTime\tTranscription\tForaging\tFork Names\tFork to Goal\tForaging Success\tLearningDoing",
    "\t\t\t\t\t\t\t",
    "1\t11:00.0\tlooking around\tY\t\t\t\t",
    "2\t11:30.0\topening Buffer\tN\tVerified\t1.start\tSuccessful\tL",
    "3\t12:00.0\treading\t1\tUndetected,False\tnone,none\tNA,Unsuccessful\t",
];

const COMMANDS: &[&str] = &[
    "Participant\tCommandID\tTime\tCommand\tActiveFile\tASTMethod\tEclipseCommand\tFind\tReplace\tDocOffset\tLineOfCode",
    "5\t0\t10:50.0\tStart",
    "5\t1\t10:58.0\tFileOpenCommand\tBuffer.java\tnull\t\t\t\t\t",
    "5\t2\t11:05.0\tSelectTextCommand\tBuffer.java\tLorg/gjt/sp/jedit/Buffer;.insert(I)V\t\t\t\t120\t",
    "5\tbad\t11:10.0\tInsert\tBuffer.java\tnull\t\t\t\t\t",
    "5\t3\t11:20.0\tInsert\tBuffer.java\tLorg/gjt/sp/jedit/Buffer;.insert(I)V\t\t\t\t130\t\"x\"",
    "5\t4\t11:40.0\tEclipseCommand\tTextArea.java\tLorg/gjt/sp/jedit/textarea/TextArea;.scrollTo(II)V\torg.eclipse.ui.file.save\t\t\t200\t",
    "5\t5\t12:10.0\tFileOpenCommand\tBuffer.java\tLorg/gjt/sp/jedit/Buffer;.(I)V\t\t\t\t\t",
];

const FEATURES: &[&str] = &[
    "Participant\tFork\tOrder\tRetro Time\tStart Time\tEnd Time\tRemoved\tFork Success\tInformation Type\tPatch",
    "\t\t\t\t\t\t\t\t\t",
    "5\t1\t1\t20:00\t11:30.0\t11:45.0\tn\tSuccessful\t\"Domain Text",
    "Comments\"\tEditor: Buffer.java",
    "5\t2\t1\t20:00\t12:00.0\t12:10.0\tn\t\tIF: Positional (line 40)\tOutline",
    "6\t1\t1\t20:00\t11:00.0\t11:10.0\tn\t\tExamples\tEditor",
];

fn write_lines(dir: &Path, name: &str, lines: &[&str]) {
    fs::write(dir.join(name), lines.join("\n")).unwrap();
}

fn study_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_lines(dir.path(), "p05-coded.txt", CODED);
    write_lines(dir.path(), "p05-commands.txt", COMMANDS);
    write_lines(dir.path(), FEATURE_MATRIX_FILE, FEATURES);
    dir
}

fn settings(dir: &TempDir) -> ChartSettings {
    let mut settings = ChartSettings {
        data_dir: dir.path().to_path_buf(),
        output_dir: dir.path().join("out"),
        participants: vec![5],
        ..ChartSettings::default()
    };
    settings.schemas.coded = ColumnSchema::new([
        "Index",
        "Time",
        "Transcription",
        "Foraging",
        "Fork Names",
        "Fork to Goal",
        "Foraging Success",
        "LearningDoing",
    ]);
    settings
}

#[test]
fn renders_one_lane_per_method_and_session_labels() {
    let dir = study_dir();
    let settings = settings(&dir);
    let loader = DataLoader::new(
        &settings.data_dir,
        settings.schemas.clone(),
        settings.coding_policy,
    );

    let coded = loader.load_coded(5).unwrap();
    let commands = loader.load_commands(5).unwrap();
    let features = loader.load_feature_types(5).unwrap();
    assert_eq!(coded.len(), 3);
    assert_eq!(commands.len(), 6);
    assert!(commands[2].error);
    assert_eq!(features.len(), 2);

    let rendered = Timeline::new(5, &settings.layout, &coded, &commands, &features)
        .render(TrackSet::FeatureTypes)
        .unwrap();

    // Buffer:insert, TextArea:scrollTo and Buffer:Constructor, plus Other.
    assert_eq!(rendered.registry.len(), 4);
    assert_eq!(rendered.registry.get("Buffer.java:Other").unwrap().lane, 0);

    let drawn: Vec<&str> = rendered.spans.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(
        drawn,
        vec!["Buffer.java:Other", "Buffer:insert", "TextArea:scrollTo"]
    );

    let session_labels: Vec<&str> = rendered
        .canvas
        .texts()
        .filter(|t| t.y == 14.0)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(session_labels, vec!["1", "2"]);
}

#[test]
fn command_chart_ticks_each_charted_command() {
    let dir = study_dir();
    let settings = settings(&dir);
    let loader = DataLoader::new(
        &settings.data_dir,
        settings.schemas.clone(),
        settings.coding_policy,
    );
    let coded = loader.load_coded(5).unwrap();
    let commands = loader.load_commands(5).unwrap();

    let rendered = Timeline::new(5, &settings.layout, &coded, &commands, &[])
        .render(TrackSet::Commands)
        .unwrap();

    let ticks: Vec<&str> = rendered
        .canvas
        .lines()
        .filter(|l| l.x1 == l.x2 && l.opacity == 0.9)
        .map(|l| l.stroke)
        .collect();
    // Select, Insert, save and the final FileOpen; the FileOpen before the
    // session start is skipped.
    assert_eq!(ticks, vec!["indigo", "red", "deeppink", "maroon"]);
}

#[test]
fn batch_writes_svg_and_reports_failures() {
    let dir = study_dir();
    let mut settings = settings(&dir);
    settings.participants = vec![5, 6];

    let report = run_batch(&settings);

    assert_eq!(report.written.len(), 1);
    assert!(report.written[0].ends_with("05-forks.svg"));
    let svg = fs::read_to_string(&report.written[0]).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(">P05</text>"));
    assert!(svg.contains(">Buffer:insert</text>"));

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 6);
}
