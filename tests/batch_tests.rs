use evsite::api::SiteEvaluator;
use evsite::batch::{load_requests, read_requests, write_reports};
use evsite::config::Config;
use evsite::core_types::{ChargerType, Region};
use evsite::error::SiteError;
use evsite::finance::FinancialInputs;
use std::io::Write;
use tempfile::NamedTempFile;

const SITES_CSV: &str = "\
site_id,demand_score,traffic_score,ev_share_score,poi_score,competition_score,parking_score,zoning_label,charger_type,parking_count,region_hint,price_per_kwh,electricity_cost,kwh_per_session,install_cost
mall, 90, 90, 90, 90, 0, 90, Likely Commercial / Retail, DCFC, 40, , , , ,
,50,50,50,50,50,50,Unknown,,,,,,,
depot,60,55,70,40,30,60,industrial,L2,12,rural,0.40,0.12,30,12000
";

#[test]
fn test_read_requests_fills_defaults() {
    let requests = read_requests(SITES_CSV.as_bytes()).unwrap();
    assert_eq!(requests.len(), 3);

    let mall = &requests[0];
    assert_eq!(mall.site_id, "mall");
    assert_eq!(mall.signals.demand_score, Some(90.0));
    assert_eq!(mall.signals.zoning_label, "Likely Commercial / Retail");
    assert_eq!(mall.signals.charger_type, ChargerType::Dcfc);
    assert_eq!(mall.signals.parking_count, 40.0);
    assert_eq!(mall.signals.region_hint, None);
    assert_eq!(mall.inputs, FinancialInputs::defaults_for(ChargerType::Dcfc));

    // Blank id and charger fall back.
    let anon = &requests[1];
    assert_eq!(anon.site_id, "row-2");
    assert_eq!(anon.signals.charger_type, ChargerType::L2);
    assert_eq!(anon.signals.parking_count, 0.0);
    assert_eq!(anon.inputs, FinancialInputs::defaults_for(ChargerType::L2));

    let depot = &requests[2];
    assert_eq!(depot.signals.region_hint, Some(Region::Rural));
    assert_eq!(
        depot.inputs,
        FinancialInputs {
            price_per_kwh: 0.40,
            electricity_cost: 0.12,
            kwh_per_session: 30.0,
            install_cost: 12_000.0,
        }
    );
}

#[test]
fn test_partial_overrides_keep_other_defaults() {
    let csv = "site_id,charger_type,install_cost\nhub,DCFC,45000\n";
    let requests = read_requests(csv.as_bytes()).unwrap();
    let inputs = requests[0].inputs;
    assert_eq!(inputs.install_cost, 45_000.0);
    assert_eq!(inputs.price_per_kwh, 0.45);
    assert_eq!(inputs.kwh_per_session, 35.0);
}

#[test]
fn test_non_numeric_cell_is_csv_error() {
    let csv = "site_id,demand_score\nbad,plenty\n";
    let err = read_requests(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, SiteError::Csv(_)));
}

#[test]
fn test_load_requests_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SITES_CSV).unwrap();
    let requests = load_requests(file.path()).unwrap();
    assert_eq!(requests.len(), 3);
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let evaluator = SiteEvaluator::new(&Config::default()).unwrap();
    let mut requests = read_requests(SITES_CSV.as_bytes()).unwrap();
    requests[1].signals.traffic_score = Some(f64::NAN);

    let results = evaluator.evaluate_batch(&requests);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().site_id, "mall");
    assert!(matches!(results[1], Err(SiteError::Validation(_))));
    assert_eq!(results[2].as_ref().unwrap().site_id, "depot");

    // Same answer as evaluating one at a time.
    let single = evaluator.evaluate_request(&requests[2]).unwrap();
    assert_eq!(results[2].as_ref().unwrap(), &single);
}

#[test]
fn test_write_reports_summary() {
    let evaluator = SiteEvaluator::new(&Config::default()).unwrap();
    let requests = read_requests(SITES_CSV.as_bytes()).unwrap();
    let reports: Vec<_> = evaluator
        .evaluate_batch(&requests)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();

    let mut out = Vec::new();
    write_reports(&mut out, &reports).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "site_id");
    assert!(headers.iter().any(|h| h == "payback_years"));
    assert!(headers.iter().any(|h| h == "verdict"));

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "mall");
    assert_eq!(&rows[0][1], "DCFC");
    assert_eq!(&rows[0][2], "urban");
    assert_eq!(&rows[1][0], "row-2");
}
