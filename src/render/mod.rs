//! 电子表格渲染
//!
//! 输入为已经计算好的报表数据，输出为 xlsx 字节流。图表引用同一工作表中
//! 写入的数据区域，颜色与前端一致。

pub mod group_evaluation;
pub mod reports;

use rust_xlsxwriter::{
    Chart, ChartPoint, ChartSolidFill, ChartType, Format, FormatBorder, Worksheet,
};

use crate::errors::Result;
use crate::models::evaluations::entities::{Classification, ClassificationCounts};

pub use group_evaluation::render_group_evaluation;
pub use reports::{render_course_by_core, render_student_by_core, render_student_by_target};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 表格与图表中的等级顺序
pub const CLASSIFICATION_ORDER: [Classification; 4] = [
    Classification::Achieved,
    Classification::ModeratelyAccomplished,
    Classification::NotAchieved,
    Classification::NotEvaluated,
];

fn title_format() -> Format {
    Format::new().set_bold().set_font_size(14)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("#E7E6E6")
        .set_border(FormatBorder::Thin)
}

fn decimal_format() -> Format {
    Format::new().set_num_format("0.00")
}

/// 写一行表头
fn write_header(sheet: &mut Worksheet, row: u32, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, &format)?;
    }
    Ok(())
}

/// 从 `row` 起写入等级分布表（标签、人数），返回数据区域的最后一行
fn write_counts_table(
    sheet: &mut Worksheet,
    row: u32,
    counts: &ClassificationCounts,
) -> Result<u32> {
    write_header(sheet, row, &["Nivel", "Cantidad"])?;
    let mut current = row;
    for classification in CLASSIFICATION_ORDER {
        current += 1;
        sheet.write_string(current, 0, classification.report_label())?;
        sheet.write_number(current, 1, counts.get(classification) as f64)?;
    }
    Ok(current)
}

/// 等级分布饼图，扇区按等级着色
fn counts_pie_chart(sheet_name: &str, first_row: u32, last_row: u32, title: &str) -> Chart {
    let points: Vec<ChartPoint> = CLASSIFICATION_ORDER
        .iter()
        .map(|c| ChartPoint::new().set_format(ChartSolidFill::new().set_color(c.chart_color())))
        .collect();

    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_categories((sheet_name, first_row, 0, last_row, 0))
        .set_values((sheet_name, first_row, 1, last_row, 1))
        .set_points(&points);
    chart.title().set_name(title);
    chart
}

/// 按学习目标分组的柱状图，每个等级一个系列
///
/// 数据区域：第 0 列为目标简称，第 1..=4 列依次为各等级人数。
fn target_column_chart(sheet_name: &str, first_row: u32, last_row: u32, title: &str) -> Chart {
    let mut chart = Chart::new(ChartType::Column);
    for (offset, classification) in CLASSIFICATION_ORDER.iter().enumerate() {
        let col = offset as u16 + 1;
        chart
            .add_series()
            .set_name(classification.report_label())
            .set_categories((sheet_name, first_row, 0, last_row, 0))
            .set_values((sheet_name, first_row, col, last_row, col))
            .set_format(ChartSolidFill::new().set_color(classification.chart_color()));
    }
    chart.title().set_name(title);
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_counts_table_covers_every_level() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let counts = ClassificationCounts {
            achieved: 2,
            not_evaluated: 1,
            ..Default::default()
        };
        let last = write_counts_table(sheet, 3, &counts).unwrap();
        assert_eq!(last, 3 + CLASSIFICATION_ORDER.len() as u32);
    }
}
