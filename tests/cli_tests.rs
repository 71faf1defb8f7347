mod common;

#[cfg(test)]
mod tests {
    use super::common::{argv, matrix_path, CapturedWriter};
    use intlower::cli::{run, CliError};
    use std::fs;

    fn run_captured(args: &[&str]) -> (Result<bool, CliError>, String) {
        let mut out = CapturedWriter::default();
        let result = run(&argv(args), &mut out);
        (result, out.output())
    }

    #[test]
    fn eval_prints_typed_result() {
        let (result, output) = run_captured(&["eval", "add", "i64:9223372036854775807", "i32:4"]);
        assert!(result.unwrap());
        assert_eq!(output, "i64:-9223372036854775805 (0x8000000000000003)\n");
    }

    #[test]
    fn eval_into_widens() {
        let (result, output) = run_captured(&["eval", "not", "i32:1000000000", "--into", "i64"]);
        assert!(result.unwrap());
        assert_eq!(output, "i64:-1000000001 (0xffffffffc46535ff)\n");
    }

    #[test]
    fn eval_surfaces_engine_errors() {
        let (result, output) = run_captured(&["eval", "div", "u32:1", "u32:0"]);
        match result {
            Err(CliError::Engine(e)) => assert_eq!(e.to_string(), "Division by zero: div on (u32, u32)"),
            other => panic!("expected engine error, got {other:?}"),
        }
        assert!(output.is_empty());

        let (result, _) = run_captured(&["eval", "neg", "u64:5"]);
        assert!(matches!(result, Err(CliError::Engine(_))));
    }

    #[test]
    fn eval_rejects_bad_arguments() {
        let (result, _) = run_captured(&["eval", "mul", "i32:1", "i32:2"]);
        assert!(matches!(result, Err(CliError::Usage(msg)) if msg == "Unknown operator: mul"));

        let (result, _) = run_captured(&["eval", "not", "i32:1", "--into"]);
        assert!(matches!(result, Err(CliError::Usage(_))));

        let (result, _) = run_captured(&["eval", "not", "1"]);
        assert!(matches!(result, Err(CliError::Engine(_))));
    }

    #[test]
    fn run_reports_fixture_success() {
        let ops = matrix_path("operations.json");
        let edges = matrix_path("edge_cases.json");
        let (result, output) = run_captured(&["run", ops.to_str().unwrap(), edges.to_str().unwrap()]);
        assert!(result.unwrap(), "{output}");
        assert!(output.contains("addition: 19 okay, 0 NOT okay"), "{output}");
        assert!(output.trim_end().ends_with("133/133 scenarios okay"), "{output}");
    }

    #[test]
    fn run_reports_failures() {
        let dir = std::env::temp_dir().join(format!("intlower-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("failing.json");
        fs::write(
            &path,
            r#"{ "scenarios": [
                { "name": "bad_sum", "group": "addition", "op": "add",
                  "operands": ["u32:1", "u32:1"], "expect": "u32:3" }
            ] }"#,
        )
        .unwrap();

        let (result, output) = run_captured(&["run", path.to_str().unwrap()]);
        assert!(!result.unwrap());
        assert!(output.contains("bad_sum NOT okay: expected u32:3, got u32:2"), "{output}");
        assert!(output.trim_end().ends_with("0/1 scenarios okay"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_missing_file() {
        let (result, _) = run_captured(&["run", "no/such/matrix.json"]);
        assert!(matches!(result, Err(CliError::Matrix(_))));
    }

    #[test]
    fn table_lists_promotions() {
        let (result, output) = run_captured(&["table"]);
        assert!(result.unwrap());
        let lines: Vec<&str> = output.lines().map(str::trim_end).collect();
        assert_eq!(lines[0], "arith i32   u32   i64   u64");
        assert_eq!(lines[1], "i32   i32   i64   i64   u64");
        assert_eq!(lines[3], "i64   i64   i64   i64   x");
        assert_eq!(lines[4], "u64   u64   u64   x     u64");

        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "shift i32   u32   i64   u64");
        assert_eq!(lines[8], "u32   u32   x     x     x");
        assert_eq!(lines[10], "u64   u64   x     x     x");

        assert_eq!(lines[12], "unary neg   not");
        assert_eq!(lines[14], "u32   i64   u32");
        assert_eq!(lines[16], "u64   x     u64");
        assert_eq!(lines.len(), 17);
    }

    #[test]
    fn eval_bytes_prints_little_endian_immediate() {
        let (result, output) = run_captured(&["eval", "sub", "i32:-3", "i32:2", "--bytes"]);
        assert!(result.unwrap());
        assert_eq!(output, "i32:-5 (0xfffffffb)\nimmediate: fbffffff\n");

        let (result, output) = run_captured(&["eval", "neg", "u32:1", "--bytes", "--into", "i64"]);
        assert!(result.unwrap());
        assert_eq!(output, "i64:-1 (0xffffffffffffffff)\nimmediate: ffffffffffffffff\n");

        let (result, output) = run_captured(&["eval", "add", "u32:0x01020304", "u32:0", "--bytes"]);
        assert!(result.unwrap());
        assert_eq!(output, "u32:16909060 (0x01020304)\nimmediate: 04030201\n");
    }

    #[test]
    fn usage_errors() {
        let (result, _) = run_captured(&[]);
        assert!(matches!(result, Err(CliError::Usage(_))));
        let (result, _) = run_captured(&["frobnicate"]);
        assert!(matches!(result, Err(CliError::Usage(msg)) if msg.contains("frobnicate")));
        let (result, output) = run_captured(&["--help"]);
        assert!(result.unwrap());
        assert!(output.starts_with("Usage:"));
    }
}
