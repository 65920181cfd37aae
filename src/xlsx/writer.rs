use crate::analysis::AnalyticsReport;
use crate::error::Result;
use rust_xlsxwriter::{ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write every view of a report to an Excel file
pub fn write_report_to_xlsx(report: &AnalyticsReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    write_key_stats_sheet(workbook.add_worksheet(), report)?;
    write_goals_sheet(workbook.add_worksheet(), report)?;
    write_shot_map_sheet(workbook.add_worksheet(), report)?;
    write_play_types_sheet(workbook.add_worksheet(), report)?;
    write_teams_sheet(workbook.add_worksheet(), report)?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// Red-to-green scale over a percentage column
fn add_rate_scale(sheet: &mut Worksheet, rows: usize, col: u16) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let scale = ConditionalFormat3ColorScale::new()
        .set_minimum_color("F8696B") // Red
        .set_midpoint_color("FFEB84") // Yellow
        .set_maximum_color("63BE7B"); // Green
    sheet.add_conditional_format(1, col, rows as u32, col, &scale)?;
    Ok(())
}

fn write_key_stats_sheet(sheet: &mut Worksheet, report: &AnalyticsReport) -> Result<()> {
    sheet.set_name("Key Stats")?;
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 12)?;
    write_headers(sheet, &["Statistic", "Value"])?;

    let stats = &report.key_stats;
    let rows = [
        ("Games", stats.total_games as f64),
        ("Plays", stats.total_plays as f64),
        ("Goals", stats.total_goals as f64),
        ("Shots", stats.total_shots as f64),
        ("Total xG", stats.total_xg),
        ("Conversion %", stats.conversion_rate),
        ("xG per Shot", stats.avg_xg_per_shot),
        ("Success %", stats.success_rate),
    ];

    let number_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.###");
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_number_with_format(row, 1, *value, &number_format)?;
    }

    Ok(())
}

fn write_goals_sheet(sheet: &mut Worksheet, report: &AnalyticsReport) -> Result<()> {
    sheet.set_name("Goals")?;
    sheet.set_column_width(0, 8)?;   // Game
    sheet.set_column_width(1, 18)?;  // Opponent
    sheet.set_column_width(2, 8)?;   // Minute
    sheet.set_column_width(3, 16)?;  // Play Type
    sheet.set_column_width(4, 24)?;  // Context
    sheet.set_column_width(5, 16)?;  // Location
    sheet.set_column_width(6, 8)?;   // xG
    sheet.set_column_width(7, 10)?;  // Win Impact
    write_headers(
        sheet,
        &["Game", "Opponent", "Minute", "Play Type", "Context", "Location", "xG", "Win Impact"],
    )?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let xg_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.00");

    for (idx, goal) in report.goals_timeline.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string_with_format(row, 0, &goal.game_id, &center_format)?;
        sheet.write_string(row, 1, &goal.opponent)?;
        sheet.write_number_with_format(row, 2, goal.minute as f64, &center_format)?;
        sheet.write_string(row, 3, &goal.play_type)?;
        sheet.write_string(row, 4, &goal.play_context)?;
        sheet.write_string(row, 5, &goal.location)?;
        sheet.write_number_with_format(row, 6, goal.xg, &xg_format)?;
        sheet.write_number_with_format(row, 7, goal.win_impact as f64, &center_format)?;
    }

    Ok(())
}

fn write_shot_map_sheet(sheet: &mut Worksheet, report: &AnalyticsReport) -> Result<()> {
    sheet.set_name("Shot Map")?;
    sheet.set_column_width(0, 20)?;
    write_headers(sheet, &["Location", "Shots", "Goals", "Avg xG", "Success %"])?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let xg_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.000");
    let pct_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.0");

    for (idx, (location, zone)) in report.shot_map_data.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, location)?;
        sheet.write_number_with_format(row, 1, zone.total_shots as f64, &center_format)?;
        sheet.write_number_with_format(row, 2, zone.goals as f64, &center_format)?;
        sheet.write_number_with_format(row, 3, zone.avg_xg, &xg_format)?;
        sheet.write_number_with_format(row, 4, zone.success_rate, &pct_format)?;
    }
    add_rate_scale(sheet, report.shot_map_data.len(), 4)?;

    Ok(())
}

fn write_play_types_sheet(sheet: &mut Worksheet, report: &AnalyticsReport) -> Result<()> {
    sheet.set_name("Play Types")?;
    sheet.set_column_width(0, 20)?;
    write_headers(sheet, &["Play Type", "Count", "Shots", "Goals", "Avg xG"])?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let xg_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.000");

    for (idx, (play_type, stats)) in report.play_type_data.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, play_type)?;
        sheet.write_number_with_format(row, 1, stats.count as f64, &center_format)?;
        sheet.write_number_with_format(row, 2, stats.shots as f64, &center_format)?;
        sheet.write_number_with_format(row, 3, stats.goals as f64, &center_format)?;
        sheet.write_number_with_format(row, 4, stats.avg_xg, &xg_format)?;
    }

    Ok(())
}

fn write_teams_sheet(sheet: &mut Worksheet, report: &AnalyticsReport) -> Result<()> {
    sheet.set_name("Teams")?;
    sheet.set_column_width(0, 20)?;
    write_headers(
        sheet,
        &["Opponent", "Games", "Goals", "Shots", "Total xG", "Conversion %", "xG per Shot"],
    )?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let xg_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.000");
    let pct_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.0");

    for (idx, (opponent, team)) in report.team_comparison.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, opponent)?;
        sheet.write_number_with_format(row, 1, team.games_played as f64, &center_format)?;
        sheet.write_number_with_format(row, 2, team.total_goals as f64, &center_format)?;
        sheet.write_number_with_format(row, 3, team.total_shots as f64, &center_format)?;
        sheet.write_number_with_format(row, 4, team.total_xg, &xg_format)?;
        sheet.write_number_with_format(row, 5, team.conversion_rate, &pct_format)?;
        sheet.write_number_with_format(row, 6, team.avg_xg_per_shot, &xg_format)?;
    }
    add_rate_scale(sheet, report.team_comparison.len(), 5)?;

    Ok(())
}
