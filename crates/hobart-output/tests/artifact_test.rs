//! Integration tests for rendering and storing artifacts.

use chrono::NaiveDate;
use hobart_data::StockRecord;
use hobart_factors::{FactorId, score_universe};
use hobart_output::{
    ArtifactKind, ArtifactName, ArtifactStore, DEGENERATE_CELL, Environment, ExportFormat, Exporter,
    MemoryStore, score_headers, scores_to_dataframe,
};

fn records() -> Vec<StockRecord> {
    ["AAA", "BBB", "CCC"]
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let x = (i + 1) as f64;
            StockRecord {
                symbol: (*symbol).to_string(),
                pe_ratio: Some(10.0 * x),
                ebitda: Some(x),
                enterprise_value: Some(10.0),
                price_to_sales: Some(x),
                year1_change: Some(0.1 * x),
                month1_change: Some(0.0),
                beta: Some(1.1),
                volatility: Some(0.2 * x),
                market_cap: if i == 1 { None } else { Some(100.0 * x) },
                avg_value_traded: Some(x),
                debt_to_equity: Some(x),
                gross_profit: Some(x),
                total_revenue: Some(10.0),
            }
        })
        .collect()
}

#[test]
fn test_factor_table_csv() {
    let scored = score_universe(&records()).unwrap();
    let csv = scored.stocks.export_to_string(ExportFormat::Csv).unwrap();

    let mut rdr = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, score_headers());

    let beta_zscore = headers.iter().position(|h| h == "beta_zscore").unwrap();
    let mcap = headers.iter().position(|h| h == "sqrt_market_cap").unwrap();
    let mcap_rank = headers.iter().position(|h| h == "sqrt_market_cap_rank").unwrap();

    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        // beta is identical for every stock
        assert_eq!(&row[beta_zscore], DEGENERATE_CELL);
    }
    // missing market cap is an empty value cell ranked last
    assert_eq!(&rows[1][mcap], "");
    assert_eq!(rows[1][mcap_rank].parse::<f64>().unwrap(), 3.0);
}

#[test]
fn test_store_three_artifacts() {
    let scored = score_universe(&records()).unwrap();
    let store = MemoryStore::new();
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    for kind in ArtifactKind::ALL {
        let name = ArtifactName::new(Environment::Production, date, kind, ExportFormat::Json);
        let body = scored.stocks.export_to_string(ExportFormat::Json).unwrap();
        store.put(&name.key(), body.as_bytes()).unwrap();
    }

    assert_eq!(
        store.keys(),
        [
            "PRODUCTION-20240501-df_bot_basket.json",
            "PRODUCTION-20240501-df_factors.json",
            "PRODUCTION-20240501-df_top_basket.json",
        ]
    );
}

#[test]
fn test_dataframe_matches_csv_columns() {
    let scored = score_universe(&records()).unwrap();
    let df = scores_to_dataframe(&scored.stocks).unwrap();

    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, score_headers());
    assert_eq!(df.height(), 3);
    assert_eq!(
        df.column(FactorId::SqrtMarketCap.name()).unwrap().null_count(),
        1
    );
}
