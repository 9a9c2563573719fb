pub const TITLE: &str = "IntelliDebug - AI Code Analyzer";
pub const STATUS_LOADING: &str = "Analyzing your code...";
pub const STATUS_READY: &str = "Ready";
pub const SUBMIT_DISABLED: &str = "submit disabled while analyzing";
pub const RULE: &str = "----------------------------------------";

pub const HELP: &[&str] = &[
    "Type or paste code; analysis runs after a short pause.",
    "  :submit, :s          analyze the current draft now",
    "  :clear, :c           discard the draft",
    "  :project <files...>  analyze several files together",
    "  :help, :h            show this help",
    "  :quit, :q            exit",
    "  ::text               a draft line starting with ':'",
];
