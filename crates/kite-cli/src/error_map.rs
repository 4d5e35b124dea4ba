use kite_core::KiteError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> KiteError {
    KiteError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: KiteError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_input_path(error: std::io::Error) -> KiteError {
    map_error("CLI_INPUT_PATH", error)
}

pub(crate) fn map_cli_kind_invalid(error: KiteError) -> KiteError {
    map_error("CLI_KIND_INVALID", error.message)
}

pub(crate) fn map_cli_output_json(error: serde_json::Error) -> KiteError {
    map_error("CLI_OUTPUT_JSON", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(KiteError::new("ERR", "failed"));
        assert_eq!(code, 1);
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(
            map_cli_input_path(std::io::Error::other("cwd")).code,
            "CLI_INPUT_PATH"
        );

        let kind = map_cli_kind_invalid(KiteError::new("PROJECT_KIND_INVALID", "bad kind"));
        assert_eq!(kind.code, "CLI_KIND_INVALID");
        assert_eq!(kind.message, "bad kind");

        let invalid = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(map_cli_output_json(invalid).code, "CLI_OUTPUT_JSON");
    }
}
