use clap::Parser;

#[derive(Parser)]
#[command(name = "vidfetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(help_template = "NAME:
   {name} - Terminal video format picker & downloader

USAGE:
   vidfetch [url] [global options]

VERSION:
   {version}

DESCRIPTION:
   {name} fetches the list of downloadable formats for a video URL from a
   remote backend, lets you filter and pick one, and triggers a server-side
   download of the chosen format.

   Controls:
     • Paste or type a video URL and press Enter
     • Tab switches between the video and audio panes
     • f cycles the quality filter of the focused pane
     • Enter picks the format under the cursor, d downloads it
     • q quits

GLOBAL OPTIONS:
{options}
")]
pub struct Cli {
    /// Video URL to fetch on startup
    pub url: Option<String>,

    /// print the version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub show_version: Option<bool>,
}
