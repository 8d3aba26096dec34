//! Scenario: repricing a catalog spread over several CSV files.
//!
//! Validates:
//! 1) Header written once, rows from every file appended in order.
//! 2) No-valid-price rows are annotated, not fatal.
//! 3) Preference changes the tie-break rows only.
//! 4) A missing file aborts with the path in the message.
//! 5) Extra input columns pass through under the five-column header.

use std::fs;
use std::path::PathBuf;

use pp_core::PriceResolver;
use pp_feed::*;

const FILE_A: &str = "\
Product Name,Current Price,Minimum Price,Maximum Price
Anchovies,3.84,3.84,3.89
Bacon,2.20,2.12,2.19
Cheese,5.57,5.82,5.88
Dates,1.09,0.88,0.91
";

const FILE_B: &str = "\
Product Name,Current Price,Minimum Price,Maximum Price
Eggs,0.65,0.70,0.72
Fish,3.84,3.79,3.99
Ham,0.77,0.70,0.72
";

fn write_tmp(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, body).expect("write fixture");
    p
}

fn reprice_all(paths: &[PathBuf], resolver: &PriceResolver) -> (RepriceReport, String) {
    let mut out = output_writer(Vec::new());
    write_header(&mut out).unwrap();

    let mut total = RepriceReport::default();
    for p in paths {
        let report =
            reprice_file(p, resolver, DEFAULT_NO_VALID_PRICE_MARKER, &mut out).expect("reprice");
        total.merge(&report);
    }
    let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
    (total, text)
}

#[test]
fn two_files_prefer_greater() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_tmp(&dir, "a.csv", FILE_A);
    let b = write_tmp(&dir, "b.csv", FILE_B);

    let resolver = PriceResolver::new(&[3, 5, 9]).unwrap();
    let (report, text) = reprice_all(&[a, b], &resolver);

    let expected = "\
Product Name,Original Price,Minimum Price,Maximum Price,New Price
Anchovies,3.84,3.84,3.89,3.85
Bacon,2.20,2.12,2.19,2.19
Cheese,5.57,5.82,5.88,5.83
Dates,1.09,0.88,0.91,0.89
Eggs,0.65,0.70,0.72,no-valid-price
Fish,3.84,3.79,3.99,3.85
Ham,0.77,0.70,0.72,no-valid-price
";
    assert_eq!(text, expected);
    assert_eq!(report.rows_read, 7);
    assert_eq!(report.rows_repriced, 5);
    assert_eq!(report.rows_unchanged, 0);
    assert_eq!(report.rows_no_valid_price, 2);
}

#[test]
fn prefer_lower_only_changes_ties() {
    let dir = tempfile::tempdir().unwrap();
    let b = write_tmp(&dir, "b.csv", FILE_B);

    let mut resolver = PriceResolver::new(&[3, 5, 9]).unwrap();
    resolver.prefer_lower_prices();
    let (_, text) = reprice_all(&[b], &resolver);

    assert!(text.contains("Fish,3.84,3.79,3.99,3.83\n"));
    assert!(text.contains("Eggs,0.65,0.70,0.72,no-valid-price\n"));
}

#[test]
fn sub_cent_digits_are_truncated_before_resolving() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(
        &dir,
        "c.csv",
        "name,current,min,max\nChips,3.849,3.79,3.999\n",
    );

    let resolver = PriceResolver::new(&[2, 5, 9]).unwrap();
    let (_, text) = reprice_all(&[p], &resolver);
    assert!(text.ends_with("Chips,3.849,3.79,3.999,3.85\n"), "{text}");
}

#[test]
fn extra_columns_pass_through_after_header() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_tmp(&dir, "a.csv", FILE_A);
    let wide = write_tmp(
        &dir,
        "wide.csv",
        "Product Name,Current Price,Minimum Price,Maximum Price,SKU\n\
         Fish,3.84,3.79,3.99,F-1\n\
         Eggs,0.65,0.70,0.72,E-7\n",
    );

    let resolver = PriceResolver::new(&[3, 5, 9]).unwrap();
    let (report, text) = reprice_all(&[a, wide], &resolver);

    assert!(text.starts_with("Product Name,Original Price,Minimum Price,Maximum Price,New Price\n"));
    assert!(text.contains("Dates,1.09,0.88,0.91,0.89\n"), "{text}");
    assert!(text.contains("Fish,3.84,3.79,3.99,F-1,3.85\n"), "{text}");
    assert!(text.ends_with("Eggs,0.65,0.70,0.72,E-7,no-valid-price\n"), "{text}");
    assert_eq!(report.rows_read, 6);
}

#[test]
fn missing_file_aborts_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");

    let resolver = PriceResolver::new(&[3, 5, 9]).unwrap();
    let mut out = output_writer(Vec::new());
    let err = reprice_file(&missing, &resolver, "x", &mut out).unwrap_err();

    assert!(matches!(err, FeedError::Open { .. }));
    assert!(err.to_string().contains("nope.csv"));
}
