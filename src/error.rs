/// Exit code when the current employee count is zero.
///
/// Other codes: `2` for invalid input or local I/O, `4` for remote/data failures.
pub const EXIT_NO_CURRENT_DATA: u8 = 3;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// The people-data API reported no current employees, so there is no anchor to scale by.
    pub fn no_current_data(company_url: &str) -> Self {
        Self::new(
            EXIT_NO_CURRENT_DATA,
            format!("No current employee data for '{company_url}'; cannot scale the trend."),
        )
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn is_no_current_data(&self) -> bool {
        self.exit_code == EXIT_NO_CURRENT_DATA
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
