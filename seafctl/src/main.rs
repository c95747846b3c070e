mod config;

use anyhow::Context;
use seaf_api::{Account, Dirent, SeafileClient};
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

const USAGE: &str = "\
Usage: seafctl <command> [args]
  ls <repo> <path>                       List a directory
  link <repo> <path>                     Print a file download link
  revision <repo> <path> <commit>        Print a download link for an old revision
  upload-link <repo>                     Print the repository upload link
  update-link <repo>                     Print the repository update link
  share [--dir] <repo> <path>            Create a shared link
  mkdir <repo> <path>                    Create a directory
  rename [--dir] <repo> <path> <name>    Rename a file or directory
  mv <repo> <path> <dst-repo> <dst-dir>  Move a file
  rm [--dir] <repo> <path>               Remove a file or directory
  star <repo> <path>                     Star a file
  unstar <repo> <path>                   Unstar a file
  starred                                List starred files
  detail <repo> <path>                   Show file details
  history <repo> <path>                  Show file history

Reads SEAFILE_SERVER_URL, SEAFILE_TOKEN and SEAFILE_LOG (also from .env).";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List { repo: String, path: String },
    Link { repo: String, path: String },
    Revision {
        repo: String,
        path: String,
        commit: String,
    },
    UploadLink { repo: String },
    UpdateLink { repo: String },
    Share {
        repo: String,
        path: String,
        dir: bool,
    },
    Mkdir { repo: String, path: String },
    Rename {
        repo: String,
        path: String,
        name: String,
        dir: bool,
    },
    Move {
        repo: String,
        path: String,
        dst_repo: String,
        dst_dir: String,
    },
    Remove {
        repo: String,
        path: String,
        dir: bool,
    },
    Star { repo: String, path: String },
    Unstar { repo: String, path: String },
    Starred,
    Detail { repo: String, path: String },
    History { repo: String, path: String },
    Help,
}

fn parse_command<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().skip(1);
    let Some(name) = args.next() else {
        return Ok(Command::Help);
    };
    let mut dir = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--dir" => dir = true,
            "--help" | "-h" => return Ok(Command::Help),
            other if other.starts_with("--") => anyhow::bail!("unknown flag: {other}"),
            _ => positional.push(arg),
        }
    }

    let command = match (name.as_str(), positional.as_slice()) {
        ("ls", [repo, path]) => Command::List {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("link", [repo, path]) => Command::Link {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("revision", [repo, path, commit]) => Command::Revision {
            repo: repo.clone(),
            path: path.clone(),
            commit: commit.clone(),
        },
        ("upload-link", [repo]) => Command::UploadLink { repo: repo.clone() },
        ("update-link", [repo]) => Command::UpdateLink { repo: repo.clone() },
        ("share", [repo, path]) => Command::Share {
            repo: repo.clone(),
            path: path.clone(),
            dir,
        },
        ("mkdir", [repo, path]) => Command::Mkdir {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("rename", [repo, path, name]) => Command::Rename {
            repo: repo.clone(),
            path: path.clone(),
            name: name.clone(),
            dir,
        },
        ("mv", [repo, path, dst_repo, dst_dir]) => Command::Move {
            repo: repo.clone(),
            path: path.clone(),
            dst_repo: dst_repo.clone(),
            dst_dir: dst_dir.clone(),
        },
        ("rm", [repo, path]) => Command::Remove {
            repo: repo.clone(),
            path: path.clone(),
            dir,
        },
        ("star", [repo, path]) => Command::Star {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("unstar", [repo, path]) => Command::Unstar {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("starred", []) => Command::Starred,
        ("detail", [repo, path]) => Command::Detail {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("history", [repo, path]) => Command::History {
            repo: repo.clone(),
            path: path.clone(),
        },
        ("help", _) | ("--help", _) | ("-h", _) => Command::Help,
        (other, args) => anyhow::bail!("unknown command or wrong arguments: {other} {args:?}"),
    };
    Ok(command)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let command = parse_command(std::env::args())?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = CliConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let account = Account::new(config.server_url.as_str(), config.token.clone())
        .context("invalid server url")?;
    let client = SeafileClient::new(account);
    run(&client, command).await
}

async fn run(client: &SeafileClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { repo, path } => {
            let dirents = client.list_directory(&repo, &path).await?;
            for dirent in &dirents {
                println!("{}", format_dirent(dirent));
            }
        }
        Command::Link { repo, path } => {
            let link = client.get_file_download_link(&repo, &path).await?;
            println!("{}", link.url);
            if let Some(file_id) = link.file_id {
                tracing::info!(%file_id, "download link issued");
            }
        }
        Command::Revision { repo, path, commit } => {
            let link = client.get_file_revision_link(&repo, &path, &commit).await?;
            println!("{}", link.url);
        }
        Command::UploadLink { repo } => println!("{}", client.get_upload_link(&repo).await?),
        Command::UpdateLink { repo } => println!("{}", client.get_update_link(&repo).await?),
        Command::Share { repo, path, dir } => {
            println!("{}", client.get_shared_link(&repo, &path, !dir).await?);
        }
        Command::Mkdir { repo, path } => {
            let reply = client.create_directory(&repo, &path).await?;
            tracing::info!(%reply, "directory created");
        }
        Command::Rename {
            repo,
            path,
            name,
            dir,
        } => {
            if dir {
                client.rename_directory(&repo, &path, &name).await?;
            } else {
                client.rename_file(&repo, &path, &name).await?;
            }
        }
        Command::Move {
            repo,
            path,
            dst_repo,
            dst_dir,
        } => client.move_file(&repo, &path, &dst_repo, &dst_dir).await?,
        Command::Remove { repo, path, dir } => {
            if dir {
                client.remove_directory(&repo, &path).await?;
            } else {
                client.remove_file(&repo, &path).await?;
            }
        }
        Command::Star { repo, path } => client.star_file(&repo, &path).await?,
        Command::Unstar { repo, path } => client.unstar_file(&repo, &path).await?,
        Command::Starred => {
            for starred in client.list_starred_files().await? {
                let marker = if starred.dir { "d" } else { "-" };
                println!("{marker} {} {}", starred.repo, starred.path);
            }
        }
        Command::Detail { repo, path } => {
            let detail = client.get_file_detail(&repo, &path).await?;
            println!("name:  {}", detail.name);
            println!("id:    {}", detail.id);
            println!("size:  {}", detail.size.unwrap_or_default());
            if let Some(mtime) = detail.mtime {
                println!("mtime: {}", mtime.format(&Rfc3339)?);
            }
        }
        Command::History { repo, path } => {
            for commit in client.get_file_history(&repo, &path).await? {
                println!(
                    "{} {} {} {}",
                    commit.id,
                    commit.ctime.format(&Rfc3339)?,
                    commit.creator_name.as_deref().unwrap_or("-"),
                    commit.desc.as_deref().unwrap_or("")
                );
            }
        }
        Command::Help => println!("{USAGE}"),
    }
    Ok(())
}

fn format_dirent(dirent: &Dirent) -> String {
    let marker = if dirent.is_dir() { "d" } else { "-" };
    let size = dirent
        .size
        .map(|size| size.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{marker} {size:>10} {} {}", dirent.id, dirent.name)
}
