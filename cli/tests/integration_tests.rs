use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn resume_fill_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_resume-fill"))
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("resume-fill-test-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a minimal but valid template package to `path`.
fn write_template(path: &PathBuf) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    let parts: &[(&str, &str)] = &[
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0"?><workbook><sheets><sheet name="模板" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
        ),
        (
            "xl/worksheets/sheet1.xml",
            r#"<?xml version="1.0"?>
<worksheet><dimension ref="A1:F45"/><sheetData>
<row r="3"><c r="A3" t="inlineStr"><is><t>姓名</t></is></c></row>
<row r="31"><c r="A31" t="inlineStr"><is><t>工作经历</t></is></c></row>
</sheetData>
<mergeCells count="2"><mergeCell ref="A31:F31"/><mergeCell ref="E32:F32"/></mergeCells>
</worksheet>"#,
        ),
    ];
    for (name, content) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

const RECORD: &str = r#"{
    "basic_info": {"name": "张三", "supplier": "某供应商"},
    "education": [{"degree_type": "本科", "university": "B大学"}],
    "work_experience": [{"start_date": "2013-03", "company": "C公司"}],
    "technical_skills": {"programming_languages": ["Rust"]}
}"#;

#[test]
fn fill_writes_output_with_default_name() {
    let dir = temp_dir("fill-default");
    let template = dir.join("template.xlsx");
    write_template(&template);
    let record = dir.join("张三_parsed.json");
    std::fs::write(&record, RECORD).unwrap();

    let output = resume_fill_cmd()
        .args([
            "fill",
            template.to_str().unwrap(),
            record.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run resume-fill");

    assert!(
        output.status.success(),
        "fill should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let filled = dir.join("张三_filled.xlsx");
    let bytes = std::fs::read(&filled).expect("output file should exist");
    assert_eq!(&bytes[..2], b"PK", "output should be a ZIP package");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cells needing review"), "stdout: {stdout}");
}

#[test]
fn fill_honors_explicit_output_path() {
    let dir = temp_dir("fill-output");
    let template = dir.join("template.xlsx");
    write_template(&template);
    let record = dir.join("record.json");
    std::fs::write(&record, RECORD).unwrap();
    let out = dir.join("custom.xlsx");

    let output = resume_fill_cmd()
        .args([
            "fill",
            template.to_str().unwrap(),
            record.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run resume-fill");

    assert!(output.status.success());
    assert!(out.exists());
}

#[test]
fn missing_record_exits_2() {
    let dir = temp_dir("missing-record");
    let template = dir.join("template.xlsx");
    write_template(&template);

    let output = resume_fill_cmd()
        .args(["fill", template.to_str().unwrap(), "/nonexistent.json"])
        .output()
        .expect("failed to run resume-fill");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn inference_error_payload_exits_2() {
    let dir = temp_dir("inference-error");
    let template = dir.join("template.xlsx");
    write_template(&template);
    let record = dir.join("record.json");
    std::fs::write(&record, r#"{"error": "解析失败"}"#).unwrap();

    let output = resume_fill_cmd()
        .args(["fill", template.to_str().unwrap(), record.to_str().unwrap()])
        .output()
        .expect("failed to run resume-fill");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("解析失败"));
}

#[test]
fn missing_template_exits_2() {
    let dir = temp_dir("missing-template");
    let record = dir.join("record.json");
    std::fs::write(&record, RECORD).unwrap();

    let output = resume_fill_cmd()
        .args(["fill", "/nonexistent.xlsx", record.to_str().unwrap()])
        .output()
        .expect("failed to run resume-fill");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn corrupt_template_exits_3() {
    let dir = temp_dir("corrupt-template");
    let template = dir.join("template.xlsx");
    std::fs::write(&template, b"not a zip").unwrap();
    let record = dir.join("record.json");
    std::fs::write(&record, RECORD).unwrap();

    let output = resume_fill_cmd()
        .args(["fill", template.to_str().unwrap(), record.to_str().unwrap()])
        .output()
        .expect("failed to run resume-fill");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn inspect_summarizes_the_record() {
    let dir = temp_dir("inspect");
    let record = dir.join("record.json");
    std::fs::write(&record, RECORD).unwrap();

    let output = resume_fill_cmd()
        .args(["inspect", record.to_str().unwrap()])
        .output()
        .expect("failed to run resume-fill");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name: 张三"));
    assert!(stdout.contains("Education: 1 entries (bachelor)"));
    assert!(stdout.contains("Work experience: 1 entries"));
}
