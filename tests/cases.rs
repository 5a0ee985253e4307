use std::fs;

use rpnexpr::Expression;
use walkdir::WalkDir;

#[derive(Debug)]
enum Expected {
    Value(f64),
    Invalid,
}

fn parse_case(line: &str) -> Option<(String, Expected)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (source, expected) = trimmed.rsplit_once("=>")?;
    let expected = match expected.trim() {
        "invalid" => Expected::Invalid,
        v => Expected::Value(v.parse()
                              .unwrap_or_else(|e| panic!("Bad expected value in '{line}': {e}"))),
    };
    Some((source.trim().to_string(), expected))
}

#[test]
fn case_files_evaluate_as_expected() {
    let mut count = 0;

    for entry in WalkDir::new("tests/cases").into_iter()
                                            .filter_map(Result::ok)
                                            .filter(|e| {
                                                e.path().extension().is_some_and(|ext| ext == "rpn")
                                            })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (source, expected) in content.lines().filter_map(parse_case) {
            count += 1;
            let expr = Expression::from_postfix(&source).unwrap_or_else(|e| {
                           panic!("Case '{source}' in {path:?} could not be read: {e}")
                       });

            match expected {
                Expected::Value(v) => {
                    assert!(expr.validate().valid, "Case '{source}' in {path:?} is invalid");
                    let actual =
                        expr.evaluate()
                            .unwrap_or_else(|e| panic!("Case '{source}' in {path:?} failed: {e}"));
                    assert!((actual - v).abs() <= 1e-9 * (1.0 + v.abs()),
                            "Case '{source}' in {path:?}: got {actual}, expected {v}");
                },
                Expected::Invalid => {
                    assert!(!expr.validate().valid,
                            "Case '{source}' in {path:?} should be invalid");
                    assert!(expr.evaluate().is_err(),
                            "Case '{source}' in {path:?} should fail to evaluate");
                },
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}
