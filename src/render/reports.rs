use rust_xlsxwriter::{Chart, ChartSolidFill, ChartType, Workbook, Worksheet};

use super::{
    CLASSIFICATION_ORDER, counts_pie_chart, decimal_format, target_column_chart, title_format,
    write_counts_table, write_header,
};
use crate::errors::Result;
use crate::models::evaluations::entities::{Classification, ClassificationCounts};
use crate::models::reports::responses::{
    CourseByCoreReport, StudentByCoreReport, StudentByTargetReport, TargetClassificationRow,
};

const SHEET: &str = "Informe";

/// 学生-学习目标报表：逐次结果、学生与班组平均折线图、等级分布饼图
pub fn render_student_by_target(report: &StudentByTargetReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(SHEET)?;
    let decimal = decimal_format();

    sheet.write_string_with_format(0, 0, report.student.full_name(), &title_format())?;
    sheet.write_string(1, 0, "Grupo")?;
    sheet.write_string(1, 1, &report.group_name)?;
    sheet.write_string(2, 0, "Núcleo")?;
    sheet.write_string(2, 1, &report.core_name)?;
    sheet.write_string(3, 0, "Objetivo")?;
    sheet.write_string(3, 1, &report.target_label)?;

    let table_row = 5;
    write_header(
        sheet,
        table_row,
        &[
            "Fecha",
            "Actividad",
            "Objetivo",
            "Nivel",
            "Valor alumno",
            "Promedio grupo",
        ],
    )?;

    let mut counts = ClassificationCounts::default();
    let mut row = table_row;
    for entry in &report.entries {
        row += 1;
        counts.add(entry.classification);
        sheet.write_string(row, 0, entry.due_date.format("%d/%m/%Y").to_string())?;
        sheet.write_string(row, 1, &entry.activity_code)?;
        sheet.write_string(
            row,
            2,
            format!(
                "{}. {}",
                entry.learning_target_identifier, entry.learning_target_name
            ),
        )?;
        sheet.write_string(row, 3, &entry.classification_label)?;
        // 缺席不写数值，折线在该点断开
        if let Some(value) = entry.student_value {
            sheet.write_number(row, 4, f64::from(value))?;
        }
        if let Some(average) = entry.group_average {
            sheet.write_number_with_format(row, 5, average, &decimal)?;
        }
    }
    sheet.set_column_width(0, 12)?;
    sheet.set_column_width(2, 40)?;
    sheet.set_column_width(3, 22)?;

    let summary_row = row + 2;
    sheet.write_string(summary_row, 0, "Promedio alumno")?;
    if let Some(average) = report.student_average {
        sheet.write_number_with_format(summary_row, 1, average, &decimal)?;
    }
    sheet.write_string(summary_row + 1, 0, "Promedio grupo")?;
    if let Some(average) = report.group_average {
        sheet.write_number_with_format(summary_row + 1, 1, average, &decimal)?;
    }

    let counts_row = summary_row + 3;
    let last = write_counts_table(sheet, counts_row, &counts)?;

    if !report.entries.is_empty() {
        let first_data = table_row + 1;
        let mut line = Chart::new(ChartType::Line);
        line.add_series()
            .set_name("Alumno")
            .set_categories((SHEET, first_data, 1, row, 1))
            .set_values((SHEET, first_data, 4, row, 4))
            .set_format(
                ChartSolidFill::new().set_color(Classification::Achieved.chart_color()),
            );
        line.add_series()
            .set_name("Grupo")
            .set_categories((SHEET, first_data, 1, row, 1))
            .set_values((SHEET, first_data, 5, row, 5))
            .set_format(
                ChartSolidFill::new()
                    .set_color(Classification::ModeratelyAccomplished.chart_color()),
            );
        line.title().set_name("Alumno vs. grupo");
        sheet.insert_chart(table_row, 7, &line)?;

        let pie = counts_pie_chart(SHEET, counts_row + 1, last, "Niveles del alumno");
        sheet.insert_chart(table_row + 16, 7, &pie)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// 班组-核心领域报表
pub fn render_course_by_core(report: &CourseByCoreReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(SHEET)?;

    sheet.write_string_with_format(0, 0, &report.group.name, &title_format())?;
    sheet.write_string(1, 0, "Núcleo")?;
    sheet.write_string(1, 1, &report.core_name)?;

    write_target_rows(sheet, 3, &report.rows, &report.totals)?;
    Ok(workbook.save_to_buffer()?)
}

/// 学生-核心领域报表
pub fn render_student_by_core(report: &StudentByCoreReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(SHEET)?;

    sheet.write_string_with_format(0, 0, report.student.full_name(), &title_format())?;
    sheet.write_string(1, 0, "Grupo")?;
    sheet.write_string(1, 1, &report.group_name)?;
    sheet.write_string(2, 0, "Núcleo")?;
    sheet.write_string(2, 1, &report.core_name)?;

    write_target_rows(sheet, 4, &report.rows, &report.totals)?;
    Ok(workbook.save_to_buffer()?)
}

/// 按学习目标的等级分布表、合计行、柱状图与合计饼图
fn write_target_rows(
    sheet: &mut Worksheet,
    table_row: u32,
    rows: &[TargetClassificationRow],
    totals: &ClassificationCounts,
) -> Result<()> {
    let mut headers = vec!["Objetivo"];
    headers.extend(CLASSIFICATION_ORDER.iter().map(|c| c.report_label()));
    headers.push("Total");
    write_header(sheet, table_row, &headers)?;

    let mut row = table_row;
    for target in rows {
        row += 1;
        write_counts_row(sheet, row, &target.abbreviated_name, &target.counts)?;
    }
    let last_target_row = row;
    write_counts_row(sheet, row + 1, "Total", totals)?;
    sheet.set_column_width(0, 16)?;

    let counts_row = row + 3;
    let last = write_counts_table(sheet, counts_row, totals)?;

    if !rows.is_empty() {
        let column = target_column_chart(
            SHEET,
            table_row + 1,
            last_target_row,
            "Niveles por objetivo",
        );
        sheet.insert_chart(table_row, 7, &column)?;
    }
    let pie = counts_pie_chart(SHEET, counts_row + 1, last, "Total de niveles");
    sheet.insert_chart(table_row + 16, 7, &pie)?;

    Ok(())
}

fn write_counts_row(
    sheet: &mut Worksheet,
    row: u32,
    label: &str,
    counts: &ClassificationCounts,
) -> Result<()> {
    sheet.write_string(row, 0, label)?;
    for (offset, classification) in CLASSIFICATION_ORDER.iter().enumerate() {
        sheet.write_number(row, offset as u16 + 1, counts.get(*classification) as f64)?;
    }
    sheet.write_number(
        row,
        CLASSIFICATION_ORDER.len() as u16 + 1,
        counts.total() as f64,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::groups::entities::{Group, GroupLevel};
    use crate::models::learning_targets::entities::Core;
    use chrono::Utc;

    fn group() -> Group {
        Group {
            id: 1,
            school_id: 1,
            name: "Kinder A".to_string(),
            level: GroupLevel::Kinder,
            responsible_professor_id: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_course_report_renders_zip_container() {
        let rows = vec![TargetClassificationRow {
            learning_target_id: 1,
            identifier: 1,
            name: "Expresar verbalmente".to_string(),
            abbreviated_name: "LV-1".to_string(),
            counts: ClassificationCounts {
                achieved: 3,
                not_achieved: 1,
                ..Default::default()
            },
        }];
        let report = CourseByCoreReport {
            group: group(),
            core: Core::VerbalLanguage,
            core_name: Core::VerbalLanguage.display_name().to_string(),
            totals: rows[0].counts,
            rows,
        };

        let buffer = render_course_by_core(&report).unwrap();
        // xlsx 为 zip 容器
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_course_report_without_targets_still_renders() {
        let report = CourseByCoreReport {
            group: group(),
            core: Core::MathematicalThinking,
            core_name: Core::MathematicalThinking.display_name().to_string(),
            rows: Vec::new(),
            totals: ClassificationCounts::default(),
        };
        assert!(render_course_by_core(&report).is_ok());
    }
}
