mod common;

use linear_lab::experiment::SpuriousRegressorExperiment;
use linear_lab::inference::{DesignMatrix, Ols, Restriction};
use std::process::Command;

#[test]
fn test_ci_report_on_fixture() {
    let data = common::fixture();
    let report = SpuriousRegressorExperiment::new().run(&data).unwrap();

    assert_eq!(report.full.names, vec!["x", "z", "const"]);
    assert_eq!(report.tests.len(), 3);

    let titles: Vec<&str> = report.tests.iter().map(|b| b.title.as_str()).collect();
    let mut unique = titles.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 3, "titles {:?}", titles);

    for block in &report.tests {
        assert!(block.result.fvalue.is_finite(), "{}", block.title);
        assert!((0.0..=1.0).contains(&block.result.pvalue), "{}", block.title);
        assert_eq!(block.result.df_denom, 17.0);
    }
    for p in &report.full.pvalues {
        assert!((0.0..=1.0).contains(p));
    }
}

#[test]
fn test_slope_is_significant_and_near_one() {
    let data = common::fixture();
    let design = DesignMatrix::from_column("x", &data.xs())
        .unwrap()
        .add_constant()
        .unwrap();
    let res = Ols::fit(&design, &data.targets()).unwrap();

    let slope = res.param("x").unwrap();
    assert!((slope - 1.0).abs() < 0.1, "slope {}", slope);
    assert!(res.pvalues[0] < 1e-6);

    let (lo, hi) = res.conf_int(0.05).unwrap()[0];
    assert!(lo < 1.0 && 1.0 < hi, "95% interval [{}, {}]", lo, hi);

    let unit_slope = res.f_test(&[Restriction::parse_list("x = 1").unwrap().remove(0)]);
    assert!(unit_slope.unwrap().pvalue > 0.05);
}

#[test]
fn test_linear_ci_binary_prints_three_blocks() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_fixture(tmp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_linear_ci"))
        .arg("--data")
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("<F test:").count(), 3);
    assert_eq!(stdout.matches("OLS Regression Results").count(), 2);
    assert!(stdout.contains("coefficient of z equals 0"));
    assert!(stdout.contains("Refit without z"));
}

#[test]
fn test_linear_ci_binary_extra_hypothesis() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_fixture(tmp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_linear_ci"))
        .arg("--data")
        .arg(&path)
        .args(["--hypothesis", "x = 1, const = 0"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).matches("<F test:").count(), 4);
}

#[test]
fn test_linear_ci_binary_fails_on_missing_data() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_linear_ci"))
        .arg("--data")
        .arg(tmp.path().join("absent.csv"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_linear_ci_binary_rejects_bad_hypothesis() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_fixture(tmp.path());
    let output = Command::new(env!("CARGO_BIN_EXE_linear_ci"))
        .arg("--data")
        .arg(&path)
        .args(["--hypothesis", "w = 0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
