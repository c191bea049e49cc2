use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::service::WindowControlProxy;

#[derive(Parser)]
#[command(name = "window-control")]
#[command(about = "List and control desktop windows over the session bus")]
pub struct Cli {
    /// Config file to use instead of ~/.config/window-control/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the service (default when no subcommand is given)
    Serve,
    /// List normal windows
    List {
        /// Print every field as JSON
        #[arg(long)]
        detailed: bool,
    },
    /// List monitors as JSON
    Monitors,
    /// Focus and raise a window
    #[command(group(
        ArgGroup::new("target")
            .required(true)
            .args(["id", "title", "title_contains", "class", "pid"])
    ))]
    Activate {
        id: Option<u64>,
        /// Exact title
        #[arg(long)]
        title: Option<String>,
        /// Case-sensitive title substring
        #[arg(long)]
        title_contains: Option<String>,
        /// Exact WM class
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        pid: Option<i32>,
    },
    /// Give a window input focus without raising it
    Focus { id: u64 },
    /// Print the focused window
    Focused,
    /// Move a window, keeping its size
    #[command(allow_negative_numbers = true)]
    Move { id: u64, x: i32, y: i32 },
    /// Resize a window in place
    Resize { id: u64, width: i32, height: i32 },
    /// Move and resize a window in one step
    #[command(allow_negative_numbers = true)]
    MoveResize {
        id: u64,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Print a window's frame as `x y width height`
    Geometry { id: u64 },
    /// Print a monitor's usable area as `x y width height`
    #[command(allow_negative_numbers = true)]
    Workarea { monitor: i32 },
    Minimize { id: u64 },
    Unminimize { id: u64 },
    Maximize { id: u64 },
    Unmaximize { id: u64 },
    Fullscreen { id: u64 },
    Unfullscreen { id: u64 },
    /// Keep a window above others
    Above {
        id: u64,
        /// Clear the flag instead
        #[arg(long)]
        off: bool,
    },
    /// Show a window on all workspaces
    Sticky {
        id: u64,
        /// Clear the flag instead
        #[arg(long)]
        off: bool,
    },
    /// Ask a window to close
    Close { id: u64 },
}

/// Handle a client command by calling the running service.
///
/// Returns whether the call succeeded; a `false` reply or a sentinel value
/// counts as failure.
pub async fn handle_client_command(cmd: Commands, config: &AppConfig) -> Result<bool> {
    let connection = zbus::Connection::session()
        .await
        .context("Failed to connect to the session bus")?;
    let proxy = WindowControlProxy::builder(&connection)
        .destination(config.bus_name.as_str())?
        .path(config.object_path.as_str())?
        .build()
        .await?;

    let call = async {
        let ok = match cmd {
            Commands::Serve => anyhow::bail!("serve is not a client command"),
            Commands::List { detailed: false } => {
                for w in proxy.list().await? {
                    println!(
                        "{}\t{}\t{}\t{}\tws={}\tmon={}\tpid={}{}",
                        w.id,
                        w.wm_class,
                        w.wm_class_instance,
                        w.title,
                        w.workspace_index,
                        w.monitor_index,
                        w.pid,
                        if w.has_focus { "\t*" } else { "" }
                    );
                }
                true
            }
            Commands::List { detailed: true } => {
                println!("{}", proxy.list_detailed().await?);
                true
            }
            Commands::Monitors => {
                println!("{}", proxy.list_monitors().await?);
                true
            }
            Commands::Activate {
                id,
                title,
                title_contains,
                class,
                pid,
            } => {
                if let Some(id) = id {
                    proxy.activate(id).await?
                } else if let Some(title) = title {
                    proxy.activate_by_title(&title).await?
                } else if let Some(substring) = title_contains {
                    proxy.activate_by_title_substring(&substring).await?
                } else if let Some(class) = class {
                    proxy.activate_by_wm_class(&class).await?
                } else if let Some(pid) = pid {
                    proxy.activate_by_pid(pid).await?
                } else {
                    false
                }
            }
            Commands::Focus { id } => proxy.focus(id).await?,
            Commands::Focused => {
                let (id, title, class) = proxy.get_focused().await?;
                println!("{id}\t{class}\t{title}");
                id != 0
            }
            Commands::Move { id, x, y } => proxy.move_window(id, x, y).await?,
            Commands::Resize { id, width, height } => proxy.resize(id, width, height).await?,
            Commands::MoveResize {
                id,
                x,
                y,
                width,
                height,
            } => proxy.move_resize(id, x, y, width, height).await?,
            Commands::Geometry { id } => print_rect(proxy.get_geometry(id).await?),
            Commands::Workarea { monitor } => print_rect(proxy.get_workarea(monitor).await?),
            Commands::Minimize { id } => proxy.minimize(id).await?,
            Commands::Unminimize { id } => proxy.unminimize(id).await?,
            Commands::Maximize { id } => proxy.maximize(id).await?,
            Commands::Unmaximize { id } => proxy.unmaximize(id).await?,
            Commands::Fullscreen { id } => proxy.fullscreen(id).await?,
            Commands::Unfullscreen { id } => proxy.unfullscreen(id).await?,
            Commands::Above { id, off } => proxy.set_above(id, !off).await?,
            Commands::Sticky { id, off } => proxy.set_sticky(id, !off).await?,
            Commands::Close { id } => proxy.close(id).await?,
        };
        Ok::<_, anyhow::Error>(ok)
    };

    call.await
        .with_context(|| format!("Call to {} failed. Is the service running?", config.bus_name))
}

fn print_rect((x, y, width, height): (i32, i32, i32, i32)) -> bool {
    println!("{x} {y} {width} {height}");
    (x, y, width, height) != (-1, -1, -1, -1)
}
