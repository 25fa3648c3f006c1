use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
     __  __    _    ____ _   _ _   _ _   _ _____
    |  \/  |  / \  / ___| | | | | | | \ | |_   _|
    | |\/| | / _ \| |   | |_| | | | |  \| | | |
    | |  | |/ ___ \ |___|  _  | |_| | |\  | | |
    |_|  |_/_/   \_\____|_| |_|\___/|_| \_| |_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
}
