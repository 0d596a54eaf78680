//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use resume_fill::{
    CellValue, DegreeTier, EducationEntry, Grid, MergeRect, PersonalInfo, ProjectEntry,
    ResumeRecord, Skills, Style, WorkEntry,
};

/// Row/column geometry of the authored template, zero-based. The
/// template numbers rows from 1, so template row 3 is index 2 here.
pub const NAME_ROW: u32 = 2;
pub const PERSONAL_FIRST_ROW: u32 = 4;
pub const BACHELOR_FIRST_ROW: u32 = 13;
pub const ADVANCED_TITLE_ROW: u32 = 21;
pub const WORK_HEADER_ROW: u32 = 30;
pub const WORK_LABEL_ROW: u32 = 31;
pub const WORK_DATA_ROW: u32 = 32;
pub const PROJECT_HEADER_ROW: u32 = 35;
pub const PROJECT_LABEL_ROW: u32 = 36;
pub const PROJECT_DATA_ROW: u32 = 37;
pub const SKILLS_TITLE_ROW: u32 = 40;
pub const LANGUAGES_ROW: u32 = 41;
pub const SKILLS_ROW: u32 = 42;
pub const CERTIFICATIONS_ROW: u32 = 43;

fn header_style() -> Style {
    Style {
        bold: true,
        centered: true,
        fill_color: Some(0xD9E1F2),
        ..Style::default()
    }
}

fn value_style() -> Style {
    Style {
        boxed: true,
        ..Style::default()
    }
}

fn set_text(grid: &mut Grid, row: u32, col: u32, text: &str) {
    grid.set_value(row, col, CellValue::Text(text.to_string()));
}

fn header(grid: &mut Grid, row: u32, text: &str) {
    set_text(grid, row, 0, text);
    grid.set_style(row, 0, header_style());
    grid.merge_range(MergeRect::new(row, 0, row, 5)).unwrap();
}

fn degree_rows(grid: &mut Grid, first_data_row: u32) {
    let labels: &[(u32, u32, &str)] = &[
        (0, 0, "入学时间"),
        (0, 2, "毕业院校"),
        (1, 0, "毕业时间"),
        (1, 2, "专业"),
        (2, 0, "毕业证编号"),
        (3, 0, "毕业证学信网在线验证码"),
        (5, 0, "学位证编号"),
        (6, 0, "学位证学信网在线验证码"),
    ];
    for &(offset, col, label) in labels {
        set_text(grid, first_data_row + offset, col, label);
    }
    for offset in 0..7 {
        grid.set_style(first_data_row + offset, 1, value_style());
        grid.set_style(first_data_row + offset, 3, value_style());
    }
}

/// Build a grid matching the pristine template's layout: anchored label
/// rows, two example rows per repeating section, header merges, and the
/// authored E:F label merges.
pub fn template_grid() -> Grid {
    let mut grid = Grid::new(45, 6);

    set_text(&mut grid, NAME_ROW, 0, "姓名");
    set_text(&mut grid, NAME_ROW, 2, "供应商");
    grid.set_style(NAME_ROW, 1, value_style());
    grid.set_style(NAME_ROW, 3, value_style());

    let personal_labels = [
        "身份证号",
        "",
        "出生日期",
        "联系电话",
        "首次参加工作时间",
        "首次从事IT工作时间",
        "最高学历",
        "合同级别",
    ];
    for (i, label) in personal_labels.iter().enumerate() {
        let row = PERSONAL_FIRST_ROW + i as u32;
        if !label.is_empty() {
            set_text(&mut grid, row, 0, label);
            grid.set_style(row, 1, value_style());
        }
    }

    header(&mut grid, BACHELOR_FIRST_ROW - 1, "本科学历");
    degree_rows(&mut grid, BACHELOR_FIRST_ROW);
    header(&mut grid, ADVANCED_TITLE_ROW, "硕士学历");
    degree_rows(&mut grid, ADVANCED_TITLE_ROW + 1);

    header(&mut grid, WORK_HEADER_ROW, "工作经历");
    let work_labels = [
        "工作开始日期（年月日）",
        "工作结束日期（年月日）",
        "单位名称",
        "岗位/职务",
        "是否自主研发工作经验",
    ];
    for (col, label) in work_labels.iter().enumerate() {
        set_text(&mut grid, WORK_LABEL_ROW, col as u32, label);
    }
    grid.merge_range(MergeRect::new(WORK_LABEL_ROW, 4, WORK_LABEL_ROW, 5))
        .unwrap();
    for row in WORK_DATA_ROW..WORK_DATA_ROW + 2 {
        for col in 0..5 {
            grid.set_style(row, col, value_style());
        }
    }

    header(&mut grid, PROJECT_HEADER_ROW, "项目经历");
    let project_labels = ["开始日期", "结束日期", "项目名称", "项目描述", "角色"];
    for (col, label) in project_labels.iter().enumerate() {
        set_text(&mut grid, PROJECT_LABEL_ROW, col as u32, label);
    }
    grid.merge_range(MergeRect::new(PROJECT_LABEL_ROW, 4, PROJECT_LABEL_ROW, 5))
        .unwrap();
    for row in PROJECT_DATA_ROW..PROJECT_DATA_ROW + 2 {
        for col in 0..6 {
            grid.set_style(row, col, value_style());
        }
    }

    header(&mut grid, SKILLS_TITLE_ROW, "技术能力");
    set_text(&mut grid, LANGUAGES_ROW, 0, "编程语言");
    set_text(&mut grid, SKILLS_ROW, 0, "技术技能");
    set_text(&mut grid, CERTIFICATIONS_ROW, 0, "资质证书");
    for row in LANGUAGES_ROW..=CERTIFICATIONS_ROW {
        grid.set_style(row, 1, value_style());
    }

    grid
}

pub fn bachelor_entry() -> EducationEntry {
    EducationEntry {
        tier: DegreeTier::Bachelor,
        enrollment_date: Some("2008-09".to_string()),
        university: Some("B大学".to_string()),
        graduation_date: Some("2012-06".to_string()),
        major: Some("计算机科学与技术".to_string()),
        diploma_number: Some("10001201205001234".to_string()),
        diploma_code: Some("CODE-B1".to_string()),
        degree_number: Some("1000142012001234".to_string()),
        degree_code: Some("CODE-B2".to_string()),
    }
}

pub fn master_entry() -> EducationEntry {
    EducationEntry {
        tier: DegreeTier::Master,
        enrollment_date: Some("2012年9月".to_string()),
        university: Some("A大学".to_string()),
        graduation_date: Some("2015-06".to_string()),
        major: Some("软件工程".to_string()),
        diploma_number: Some("10001201505005678".to_string()),
        diploma_code: Some("CODE-M1".to_string()),
        degree_number: Some("1000132015005678".to_string()),
        degree_code: Some("CODE-M2".to_string()),
    }
}

pub fn doctorate_entry() -> EducationEntry {
    EducationEntry {
        tier: DegreeTier::Doctorate,
        enrollment_date: Some("2015-09".to_string()),
        university: Some("C大学".to_string()),
        graduation_date: Some("2019-06".to_string()),
        major: Some("计算机应用技术".to_string()),
        diploma_number: Some("10001201905009999".to_string()),
        diploma_code: None,
        degree_number: None,
        degree_code: None,
    }
}

pub fn work_entry(i: u32) -> WorkEntry {
    WorkEntry {
        start_date: Some(format!("{}-07", 2012 + i)),
        end_date: Some(format!("{}-06", 2013 + i)),
        company: Some(format!("公司{}", i + 1)),
        position: Some("开发工程师".to_string()),
        is_flagged_program: Some(i % 2 == 0),
    }
}

pub fn project_entry(i: u32) -> ProjectEntry {
    ProjectEntry {
        start_date: Some(format!("{}-01", 2016 + i)),
        end_date: Some(format!("{}-12", 2016 + i)),
        name: Some(format!("项目{}", i + 1)),
        description: Some("核心系统建设".to_string()),
        role: Some("后端开发".to_string()),
        is_flagged_program: Some(true),
    }
}

/// A fully populated record with a bachelor and master degree and lists
/// exactly matching the template's example row counts.
pub fn base_record() -> ResumeRecord {
    ResumeRecord {
        basic_info: resume_fill::BasicInfo {
            name: Some("张三".to_string()),
            supplier: Some("某供应商".to_string()),
        },
        personal_info: PersonalInfo {
            id_number: Some("110101199001011234".to_string()),
            birth_date: Some("1990-01-01".to_string()),
            phone: Some("13800000000".to_string()),
            first_work_date: Some("2012-07".to_string()),
            first_it_work_date: Some("2013-03".to_string()),
            highest_education: Some("硕士".to_string()),
            contract_level: Some("P5".to_string()),
        },
        education: vec![master_entry(), bachelor_entry()],
        work_experience: (0..2).map(work_entry).collect(),
        project_experience: (0..2).map(project_entry).collect(),
        technical_skills: Skills {
            languages: vec!["Rust".to_string(), "Java".to_string()],
            skills: vec!["分布式系统".to_string()],
            certifications: vec!["软件设计师".to_string()],
        },
    }
}

pub fn cell_text(grid: &Grid, row: u32, col: u32) -> Option<&str> {
    grid.value(row, col).and_then(CellValue::as_text)
}

pub fn is_highlighted(grid: &Grid, row: u32, col: u32) -> bool {
    grid.style(row, col).is_some_and(Style::is_highlighted)
}

/// Count placeholder cells in the grid; must agree with the report.
pub fn count_placeholders(grid: &Grid) -> u32 {
    let mut count = 0;
    for row in 0..grid.nrows() {
        for col in 0..grid.ncols() {
            if cell_text(grid, row, col) == Some(resume_fill::PLACEHOLDER) {
                count += 1;
            }
        }
    }
    count
}
