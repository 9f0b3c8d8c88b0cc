use colored::*;

use crate::terminal::print;

const BANNER_0: &str = r#"
     ██████╗  ██████╗ ██████╗ ████████╗██╗  ██╗ ██████╗ ██╗     ███████╗
     ██╔══██╗██╔═══██╗██╔══██╗╚══██╔══╝██║  ██║██╔═══██╗██║     ██╔════╝
     ██████╔╝██║   ██║██████╔╝   ██║   ███████║██║   ██║██║     █████╗
     ██╔═══╝ ██║   ██║██╔══██╗   ██║   ██╔══██║██║   ██║██║     ██╔══╝
     ██║     ╚██████╔╝██║  ██║   ██║   ██║  ██║╚██████╔╝███████╗███████╗
     ╚═╝      ╚═════╝ ╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚══════╝
"#;

const BANNER_1: &str = r#"
                        _   _           _
       _ __   ___  _ __| |_| |__   ___ | | ___
      | '_ \ / _ \| '__| __| '_ \ / _ \| |/ _ \
      | |_) | (_) | |  | |_| | | | (_) | |  __/
      | .__/ \___/|_|   \__|_| |_|\___/|_|\___|
      |_|
"#;

pub fn print() {
    let art: ColoredString = match rand::random_range(0..=1u8) {
        0 => BANNER_0.bright_cyan(),
        _ => BANNER_1.truecolor(255, 165, 0),
    };
    print::print(&art.to_string());
}
