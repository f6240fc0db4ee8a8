use rust_xlsxwriter::{Chart, ChartPoint, ChartSolidFill, ChartType, Workbook};

use super::{
    CLASSIFICATION_ORDER, counts_pie_chart, title_format, write_counts_table, write_header,
};
use crate::errors::Result;
use crate::models::evaluations::entities::ClassificationCounts;
use crate::models::evaluations::responses::GroupEvaluationDetailResponse;

const SHEET: &str = "Evaluacion";

/// 班组评估评分表：学生明细、等级分布饼图与柱状图
pub fn render_group_evaluation(
    detail: &GroupEvaluationDetailResponse,
    counts: &ClassificationCounts,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(SHEET)?;

    sheet.write_string_with_format(
        0,
        0,
        format!("{} - {}", detail.group.name, detail.activity.code),
        &title_format(),
    )?;
    sheet.write_string(1, 0, "Objetivo")?;
    sheet.write_string(1, 1, &detail.learning_target.name)?;
    sheet.write_string(2, 0, "Fecha de término")?;
    sheet.write_string(2, 1, detail.evaluation.due_date.format("%d/%m/%Y").to_string())?;
    sheet.write_string(3, 0, "Estado")?;
    sheet.write_string(3, 1, &detail.status_label)?;

    let table_row = 5;
    write_header(
        sheet,
        table_row,
        &["N°", "Alumno", "Clasificación", "Anotaciones"],
    )?;
    let mut row = table_row;
    for student in &detail.students {
        row += 1;
        sheet.write_number(row, 0, f64::from(student.list_number))?;
        sheet.write_string(row, 1, &student.student_name)?;
        sheet.write_string(row, 2, &student.classification_name)?;
        sheet.write_string(
            row,
            3,
            student
                .student_evaluation
                .annotations
                .as_deref()
                .unwrap_or_default(),
        )?;
    }
    sheet.set_column_width(1, 32)?;
    sheet.set_column_width(2, 18)?;
    sheet.set_column_width(3, 40)?;

    let counts_row = row + 2;
    let last = write_counts_table(sheet, counts_row, counts)?;

    let pie = counts_pie_chart(SHEET, counts_row + 1, last, "Distribución de niveles");
    sheet.insert_chart(table_row, 5, &pie)?;

    let mut column = Chart::new(ChartType::Column);
    let series = column
        .add_series()
        .set_name("Alumnos")
        .set_categories((SHEET, counts_row + 1, 0, last, 0))
        .set_values((SHEET, counts_row + 1, 1, last, 1));
    // 柱状图每根柱子单独着色
    let points: Vec<_> = CLASSIFICATION_ORDER
        .iter()
        .map(|c| {
            ChartPoint::new()
                .set_format(ChartSolidFill::new().set_color(c.chart_color()))
        })
        .collect();
    series.set_points(&points);
    column.title().set_name("Alumnos por nivel");
    sheet.insert_chart(table_row + 16, 5, &column)?;

    Ok(workbook.save_to_buffer()?)
}
