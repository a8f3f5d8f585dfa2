mod common;

use linear_lab::dataset::NoisyLineGenerator;
use linear_lab::experiment::{DegreeSummary, OverfittingExperiment};
use linear_lab::LinearLabError;
use std::process::Command;

#[test]
fn test_sweep_properties_on_fixture() {
    let report = OverfittingExperiment::new().run(&common::fixture()).unwrap();
    assert_eq!(report.entries.len(), 4);

    for pair in report.entries.windows(2) {
        assert!(pair[1].in_sample.mse <= pair[0].in_sample.mse + 1e-6);
    }
    let first = &report.entries[0];
    let last = &report.entries[3];
    assert_eq!(last.degree, 10);
    assert!(last.generalization.mse >= first.generalization.mse);
    assert!(last.in_sample.r_squared >= first.in_sample.r_squared - 1e-9);
}

#[test]
fn test_sweep_on_lesson_dataset() {
    let data = NoisyLineGenerator::lesson_dataset().unwrap();
    let report = OverfittingExperiment::new().run(&data).unwrap();
    for pair in report.entries.windows(2) {
        assert!(pair[1].in_sample.mse <= pair[0].in_sample.mse + 1e-6);
    }
    for entry in &report.entries {
        assert!(entry.in_sample.r_squared <= 1.0);
    }
}

#[test]
fn test_split_always_trains_on_fifteen_rows() {
    let generator = NoisyLineGenerator::new();
    for total in [16usize, 20, 25, 40] {
        let xs: Vec<f64> = (0..total).map(|i| 10.0 + i as f64).collect();
        let data = generator.clone().with_xs(xs).generate_seeded(7).unwrap();

        let experiment = OverfittingExperiment::new().with_degrees(vec![1]);
        let (train, test) = experiment.split(&data);
        assert_eq!(train.len(), 15);
        assert_eq!(test.len(), total - 15);
        assert_eq!(train.observations()[14], data.observations()[14]);
        assert_eq!(test.observations()[0], data.observations()[15]);

        let report = experiment.run(&data).unwrap();
        assert_eq!((report.train_rows, report.test_rows), (15, total - 15));
    }
}

#[test]
fn test_short_dataset_has_no_test_rows() {
    let (head, _) = common::fixture().split_at(12);
    assert!(matches!(
        OverfittingExperiment::new().run(&head),
        Err(LinearLabError::EmptyData(_))
    ));
}

#[test]
fn test_linear_overfitting_binary_writes_report_and_figures() {
    let tmp = tempfile::tempdir().unwrap();
    let data_path = common::write_fixture(tmp.path());
    let figures = tmp.path().join("figures");
    let report_path = tmp.path().join("sweep.json");

    let output = Command::new(env!("CARGO_BIN_EXE_linear_overfitting"))
        .arg("--data")
        .arg(&data_path)
        .arg("--out-dir")
        .arg(&figures)
        .arg("--report")
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summaries: Vec<DegreeSummary> =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    let degrees: Vec<usize> = summaries.iter().map(|s| s.degree).collect();
    assert_eq!(degrees, vec![1, 4, 7, 10]);

    assert!(figures.join("overfitting_in_sample.svg").exists());
    assert!(figures.join("overfitting_generalization.svg").exists());
}

#[test]
fn test_linear_overfitting_binary_no_plot() {
    let tmp = tempfile::tempdir().unwrap();
    let data_path = common::write_fixture(tmp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_linear_overfitting"))
        .arg("--data")
        .arg(&data_path)
        .arg("--no-plot")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("15 training rows, 5 test rows"));
    assert!(!tmp.path().join("overfitting_in_sample.svg").exists());
}
