//! Integration tests for evaluation.
//!
//! These tests run strategies and metrics together on files written and
//! read back through data-loader, the way the harness uses them.

use data_loader::{save_data_model, DataModel, Parser, Preference, SimpleParser};
use evaluation::metrics::{ErrorMetric, Ndcg, Precision, RankingMetric, Recall, Rmse};
use evaluation::{filter_recommendations, StrategyKind};
use std::sync::Arc;
use tempfile::tempdir;

fn create_test_setup() -> (Arc<DataModel>, Arc<DataModel>, DataModel) {
    let training = DataModel::from_preferences(vec![
        Preference::new(1, 1, 5.0),
        Preference::new(1, 2, 4.0),
        Preference::new(2, 1, 3.0),
        Preference::new(2, 3, 4.0),
    ]);
    let test = DataModel::from_preferences(vec![
        Preference::new(1, 3, 5.0),
        Preference::new(1, 4, 2.0),
        Preference::new(2, 2, 4.0),
        Preference::new(2, 4, 1.0),
    ]);
    // Full ranked lists, the shape the recommender produces
    let recs = DataModel::from_preferences(vec![
        Preference::new(1, 3, 4.5),
        Preference::new(1, 5, 4.0),
        Preference::new(1, 4, 3.0),
        Preference::new(2, 4, 3.5),
        Preference::new(2, 2, 3.0),
        Preference::new(2, 5, 2.0),
    ]);
    (Arc::new(training), Arc::new(test), recs)
}

#[test]
fn test_strategy_model_round_trip() {
    let dir = tempdir().unwrap();
    let (training, test, recs) = create_test_setup();

    let strategy = StrategyKind::UserTest.build(training, test, 3.0, 2048);
    let filtered = filter_recommendations(strategy.as_ref(), &recs);

    let path = dir.path().join("strategymodel_0.csv");
    save_data_model(&filtered, &path, true).unwrap();
    let reloaded = SimpleParser.parse_data(&path).unwrap();

    assert_eq!(reloaded, filtered);
    // Item 5 is nobody's test item
    assert_eq!(reloaded.num_preferences(), 4);
    assert!(reloaded.preference(1, 5).is_none());
}

#[test]
fn test_metrics_on_full_and_filtered_lists() {
    let (training, test, recs) = create_test_setup();

    let precision = Precision::new(&[1, 2], 3.0);
    let full = precision.compute(&recs, &test);
    // user 1: top-1 is item 3 (relevant); user 2: top-1 is item 4 (not)
    assert_eq!(full.value_at(1), Some(0.5));

    let strategy = StrategyKind::UserTest.build(training, test.clone(), 3.0, 2048);
    let filtered = filter_recommendations(strategy.as_ref(), &recs);
    let filtered_result = precision.compute(&filtered, &test);
    assert_eq!(filtered_result.value_at(2), Some(0.5));

    let recall = Recall::new(&[2], 3.0).compute(&filtered, &test);
    assert_eq!(recall.value_at(2), Some(1.0));

    let ndcg = Ndcg::new(&[10]).compute(&recs, &test).value_at(10).unwrap();
    assert!(ndcg > 0.0 && ndcg <= 1.0);

    // Only test pairs are scored: (1,3) -0.5, (1,4) +1.0, (2,2) -1.0, (2,4) +2.5
    let rmse = Rmse.compute(&recs, &test).value;
    let expected = ((0.25 + 1.0 + 1.0 + 6.25) / 4.0f64).sqrt();
    assert!((rmse - expected).abs() < 1e-12);
}

#[test]
fn test_every_strategy_keeps_a_subset() {
    let (training, test, recs) = create_test_setup();

    for kind in StrategyKind::ALL {
        let strategy = kind.build(training.clone(), test.clone(), 3.0, 7);
        let filtered = filter_recommendations(strategy.as_ref(), &recs);

        for user in filtered.users() {
            for item in filtered.user_items(user) {
                assert_eq!(filtered.preference(user, item), recs.preference(user, item));
                assert!(training.preference(user, item).is_none(), "{kind} kept a training item");
            }
        }
    }
}
