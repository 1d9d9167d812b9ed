use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use evsite::api::SiteReport;
use evsite::finance::{ForecastYear, Verdict};
use evsite::model::UtilizationResult;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn money(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", -v)
    } else {
        format!("${:.2}", v)
    }
}

fn payback(v: f64) -> String {
    if v.is_finite() {
        format!("{:.2}", v)
    } else {
        "never".to_string()
    }
}

pub fn print_feature_table(report: &SiteReport) {
    let f = &report.features;
    println!("\n📍 Site: {}", report.site_id);

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    let rows: Vec<(&str, String)> = vec![
        ("Demand", format!("{:.2}", f.demand)),
        ("Traffic", format!("{:.2}", f.traffic)),
        ("EV Share", format!("{:.2}", f.ev_share)),
        ("POI", format!("{:.2}", f.poi)),
        ("Competitor Saturation", format!("{:.2}", f.competition_saturation)),
        ("Parking", format!("{:.2}", f.parking)),
        ("Parking Capacity", format!("{:.2}", f.parking_capacity_factor)),
        ("Zoning", f.zoning_type.to_string()),
        ("Region", f.region.to_string()),
        ("Fleet / Household", format!("{:.2} / {:.2}", f.fleet_share, f.household_share)),
        ("Charger", f.charger_type.to_string()),
        ("Sensitivity / Dwell", format!("{:.2} / {:.2}", f.charger_sensitivity, f.dwell_time_factor)),
        ("Regional Multiplier", format!("{:.2}", f.regional_multiplier)),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    right_align(&mut table, 1..=1);
    println!("{}", table);
}

pub fn print_factor_breakdown(result: &UtilizationResult) {
    println!("\n📊 ARC-LM Factor Breakdown");

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Factor").add_attribute(Attribute::Bold),
        Cell::new("Contribution"),
        Cell::new("Share %").fg(Color::Cyan),
    ]);

    for c in &result.breakdown {
        table.add_row(vec![
            Cell::new(c.factor.to_string()),
            Cell::new(format!("{:.4}", c.contribution)),
            Cell::new(format!("{:.1}", c.share_pct)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Raw Score").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", result.raw_score)),
        Cell::new("100.0"),
    ]);
    right_align(&mut table, 1..=2);
    println!("{}", table);
}

pub fn print_financial_summary(report: &SiteReport) {
    let u = &report.utilization;
    let fin = &report.financials;
    let inputs = &report.inputs;

    println!("\n💰 Financial Summary");
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    let verdict_color = match report.verdict {
        Verdict::Build => Color::Green,
        Verdict::Marginal => Color::Red,
    };

    let rows: Vec<(&str, String)> = vec![
        ("Utilization Index", format!("{:.1}", u.utilization_index)),
        ("Sessions / Day", format!("{}-{}", u.sessions_low, u.sessions_high)),
        ("Avg Sessions / Day", format!("{:.1}", fin.avg_sessions_per_day)),
        ("Price / kWh", money(inputs.price_per_kwh)),
        ("Electricity / kWh", money(inputs.electricity_cost)),
        ("kWh / Session", format!("{:.1}", inputs.kwh_per_session)),
        ("Install Cost", money(inputs.install_cost)),
        ("Daily Revenue", money(fin.daily_revenue)),
        ("Daily Cost", money(fin.daily_cost)),
        ("Daily Profit", money(fin.daily_profit)),
        ("Monthly Profit", money(fin.monthly_profit)),
        ("Annual Profit", money(fin.annual_profit)),
        ("Payback (years)", payback(fin.payback_years)),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Verdict").add_attribute(Attribute::Bold),
        Cell::new(report.verdict.to_string())
            .fg(verdict_color)
            .add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1..=1);
    println!("{}", table);
}

pub fn print_forecast_table(forecast: &[ForecastYear], install_cost: f64) {
    println!("\n📈 {}-Year Forecast (install {})", forecast.len(), money(install_cost));

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Sessions/Day"),
        Cell::new("Price/kWh"),
        Cell::new("Cost/kWh"),
        Cell::new("Annual"),
        Cell::new("Cumulative").fg(Color::Cyan),
        Cell::new("ROI"),
    ]);

    for y in forecast {
        let roi = y
            .cumulative_roi
            .map(|r| format!("{:.1}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let cumulative = Cell::new(money(y.cumulative_profit)).fg(if y.cumulative_profit >= install_cost {
            Color::Green
        } else {
            Color::Reset
        });

        table.add_row(vec![
            Cell::new(y.year),
            Cell::new(format!("{:.2}", y.avg_sessions_per_day)),
            Cell::new(format!("{:.3}", y.price_per_kwh)),
            Cell::new(format!("{:.3}", y.electricity_cost)),
            Cell::new(money(y.annual_profit)),
            cumulative,
            Cell::new(roi),
        ]);
    }
    right_align(&mut table, 0..=6);
    println!("{}", table);
}

pub fn print_batch_summary(reports: &[SiteReport]) {
    println!("\n🗺️  === BATCH SUMMARY === 🗺️");

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Site").add_attribute(Attribute::Bold),
        Cell::new("Type"),
        Cell::new("Region"),
        Cell::new("Util").fg(Color::Cyan),
        Cell::new("Sessions"),
        Cell::new("Monthly"),
        Cell::new("Payback"),
        Cell::new("Break-even"),
        Cell::new("Verdict").add_attribute(Attribute::Bold),
    ]);

    // Best payback first; non-paying sites sink to the bottom.
    let mut sorted: Vec<&SiteReport> = reports.iter().collect();
    sorted.sort_by(|a, b| {
        a.financials
            .payback_years
            .total_cmp(&b.financials.payback_years)
    });

    for r in sorted {
        let verdict_color = match r.verdict {
            Verdict::Build => Color::Green,
            Verdict::Marginal => Color::Red,
        };
        table.add_row(vec![
            Cell::new(&r.site_id),
            Cell::new(r.features.charger_type.to_string()),
            Cell::new(r.features.region.to_string()),
            Cell::new(format!("{:.1}", r.utilization.utilization_index)),
            Cell::new(format!("{}-{}", r.utilization.sessions_low, r.utilization.sessions_high)),
            Cell::new(money(r.financials.monthly_profit)),
            Cell::new(payback(r.financials.payback_years)),
            Cell::new(
                r.break_even_year
                    .map(|y| format!("Y{}", y))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(r.verdict.to_string()).fg(verdict_color),
        ]);
    }
    right_align(&mut table, 3..=7);
    println!("{}", table);
}
