//! Trend aggregation tests against an in-memory store.

mod common;

use auction_insights::TrendFilters;

#[test]
fn porsche_scenario() {
    let store = common::empty_store();
    for (price, date) in [
        (100_000.0, (2023, 1, 5)),
        (120_000.0, (2023, 1, 28)),
        (90_000.0, (2023, 2, 14)),
    ] {
        store
            .sales()
            .create(&common::sale("Porsche 911", Some("Porsche"), None, Some(price), Some(date), None))
            .unwrap();
    }

    let resp = store
        .trends()
        .compute(&TrendFilters::for_makes(["Porsche"]))
        .unwrap();

    assert_eq!(resp.series.len(), 1);
    let series = &resp.series[0];
    assert_eq!(series.make, "Porsche");
    assert_eq!(series.data.len(), 2);

    assert_eq!(series.data[0].period, "2023-01");
    assert_eq!(series.data[0].avg_price, 110_000.0);
    assert_eq!(series.data[0].min_price, 100_000.0);
    assert_eq!(series.data[0].max_price, 120_000.0);
    assert_eq!(series.data[0].count, 2);

    assert_eq!(series.data[1].period, "2023-02");
    assert_eq!(series.data[1].avg_price, 90_000.0);
    assert_eq!(series.data[1].count, 1);

    assert_eq!(series.avg_price, 103_333.33);
    assert_eq!(series.total_count, 3);
}

#[test]
fn incomplete_records_are_excluded() {
    let store = common::setup_sample_store();
    let resp = store.trends().compute(&TrendFilters::default()).unwrap();

    let total: i64 = resp.series.iter().map(|s| s.total_count).sum();
    assert_eq!(total, 6);
    assert!(resp.series.iter().all(|s| !s.make.is_empty()));
    assert!(resp
        .series
        .iter()
        .flat_map(|s| s.data.iter())
        .all(|p| p.period != "2023-03"));
}

#[test]
fn series_order_follows_first_month_seen() {
    let store = common::setup_sample_store();
    let resp = store.trends().compute(&TrendFilters::default()).unwrap();

    // Ferrari sold first (2022-12); Jaguar and Porsche share 2023-01.
    let makes: Vec<&str> = resp.series.iter().map(|s| s.make.as_str()).collect();
    assert_eq!(makes, vec!["Ferrari", "Jaguar", "Porsche"]);

    let ferrari = &resp.series[0];
    let periods: Vec<&str> = ferrari.data.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec!["2022-12", "2023-02"]);
}

#[test]
fn multiple_makes_filter_is_a_union() {
    let store = common::setup_sample_store();
    let resp = store
        .trends()
        .compute(&TrendFilters::for_makes(["Jaguar", "Ferrari"]))
        .unwrap();

    let makes: Vec<&str> = resp.series.iter().map(|s| s.make.as_str()).collect();
    assert_eq!(makes, vec!["Ferrari", "Jaguar"]);
}

#[test]
fn make_match_is_exact() {
    let store = common::setup_sample_store();
    let resp = store
        .trends()
        .compute(&TrendFilters::for_makes(["porsche"]))
        .unwrap();
    assert!(resp.series.is_empty());
}

#[test]
fn model_filter() {
    let store = common::setup_sample_store();
    let filters = TrendFilters {
        model: Some("911".to_string()),
        ..TrendFilters::default()
    };
    let resp = store.trends().compute(&filters).unwrap();

    assert_eq!(resp.series.len(), 1);
    assert_eq!(resp.series[0].make, "Porsche");
    assert_eq!(resp.series[0].total_count, 2);
}

#[test]
fn year_bounds_are_inclusive() {
    let store = common::setup_sample_store();
    let filters = TrendFilters {
        year_min: Some(1963),
        year_max: Some(1965),
        ..TrendFilters::default()
    };
    let resp = store.trends().compute(&filters).unwrap();

    let makes: Vec<&str> = resp.series.iter().map(|s| s.make.as_str()).collect();
    assert_eq!(makes, vec!["Jaguar", "Porsche"]);
    assert_eq!(resp.series[1].total_count, 1);
    assert_eq!(resp.series[1].data[0].avg_price, 100_000.0);
}

#[test]
fn year_min_beyond_data_returns_no_series() {
    let store = common::empty_store();
    store
        .sales()
        .create(&common::sale("2023 sale", Some("Porsche"), None, Some(1.0), Some((2023, 6, 1)), Some(2023)))
        .unwrap();

    let filters = TrendFilters {
        year_min: Some(2024),
        ..TrendFilters::default()
    };
    assert!(store.trends().compute(&filters).unwrap().series.is_empty());
}

#[test]
fn empty_store_returns_no_series() {
    let store = common::empty_store();
    assert!(store.trends().compute(&TrendFilters::default()).unwrap().series.is_empty());
}

#[test]
fn point_counts_match_bucket_sizes_and_weighted_average_holds() {
    let store = common::setup_sample_store();
    let resp = store.trends().compute(&TrendFilters::default()).unwrap();

    for series in &resp.series {
        assert!(series.data.iter().all(|p| p.count >= 1));

        let weighted: f64 = series.data.iter().map(|p| p.avg_price * p.count as f64).sum();
        let rollup = series.avg_price * series.total_count as f64;
        assert!(
            (weighted - rollup).abs() <= 0.005 * series.total_count as f64,
            "{}: {} vs {}",
            series.make,
            weighted,
            rollup
        );
    }
}

#[test]
fn prices_are_rounded_to_cents() {
    let store = common::empty_store();
    for price in [10.0, 10.0, 10.01] {
        store
            .sales()
            .create(&common::sale("Mini", Some("Austin"), None, Some(price), Some((1999, 9, 9)), None))
            .unwrap();
    }
    let resp = store.trends().compute(&TrendFilters::default()).unwrap();
    let point = &resp.series[0].data[0];
    assert_eq!(point.period, "1999-09");
    assert_eq!(point.avg_price, 10.0);
    assert_eq!(point.max_price, 10.01);
}

#[test]
fn monthly_buckets_are_chronological() {
    let store = common::setup_sample_store();
    let buckets = store.trends().monthly_buckets(&TrendFilters::default()).unwrap();

    let keys: Vec<(i32, u32)> = buckets.iter().map(|b| (b.sale_year, b.sale_month)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
