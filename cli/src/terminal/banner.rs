use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
              ██╗  ██╗ ██████╗ ██╗   ██╗███╗   ██╗██████╗
              ██║  ██║██╔═══██╗██║   ██║████╗  ██║██╔══██╗
              ███████║██║   ██║██║   ██║██╔██╗ ██║██║  ██║
              ██╔══██║██║   ██║██║   ██║██║╚██╗██║██║  ██║
              ██║  ██║╚██████╔╝╚██████╔╝██║ ╚████║██████╔╝
              ╚═╝  ╚═╝ ╚═════╝  ╚═════╝ ╚═╝  ╚═══╝╚═════╝
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
}
