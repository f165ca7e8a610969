use mimalloc::MiMalloc;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use newsfeed::config::{DEFAULT_CONFIG_PATH, load_config_or_default};
use newsfeed::social::post::now_millis;
use newsfeed::social::{Directory, NewsFeedNavigator, Post};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

enum BrowseExit {
    Back,
    Quit,
}

fn print_help() {
    println!("The valid commands are->");
    println!("users: Lists every known user");
    println!("create [name]: Creates a new user");
    println!("login [name]: Opens a session as that user");
    println!("logout: Closes the current session");
    println!("whoami: Shows the logged in user");
    println!("post [text]: Publishes a new message");
    println!("follow [name] / unfollow [name]: Manages your subscriptions");
    println!("following: Lists the users you follow");
    println!("feed: Browses your posts and the posts of everyone you follow");
    println!("timeline: Browses your own posts");
    println!("exit: Quits");
}

fn describe_age(created_at: u64) -> String {
    let seconds = now_millis().saturating_sub(created_at) / 1000;
    match seconds {
        0..60 => format!("{}s ago", seconds),
        60..3600 => format!("{}m ago", seconds / 60),
        3600..86400 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86400),
    }
}

fn render(index: Option<usize>, author: &str, post: &Post) {
    println!(
        "#{} {} ({}): {}",
        index.map_or(0, |i| i + 1),
        author,
        describe_age(post.created_at()),
        post.text()
    );
}

fn render_controls(navigator: &NewsFeedNavigator<'_>) {
    let next = if navigator.can_go_next() { "[n]ext" } else { "" };
    let previous = if navigator.can_go_previous() { "[p]rev" } else { "" };
    println!("  {} {} [b]ack", previous, next);
}

fn browse(
    rl: &mut DefaultEditor,
    directory: &Directory,
    user: &str,
    timeline: bool,
) -> Result<BrowseExit, ReadlineError> {
    let session = match directory.login(user) {
        Ok(session) => session,
        Err(e) => {
            println!("{}", e);
            return Ok(BrowseExit::Back);
        }
    };
    let mut navigator = if timeline {
        session.timeline_navigator()
    } else {
        match session.news_feed_navigator() {
            Ok(navigator) => navigator,
            Err(e) => {
                println!("{}", e);
                return Ok(BrowseExit::Back);
            }
        }
    };
    info!(
        user,
        sources = navigator.feed().source_count(),
        "feed opened"
    );

    match navigator.show_first() {
        Some((author, post)) => {
            let author = author.to_string();
            render(navigator.current_index(), &author, post);
        }
        None => println!("Nothing to show yet."),
    }
    render_controls(&navigator);

    loop {
        let line = rl.readline("feed> ")?;
        let line = line.trim();
        let shown = match line {
            "n" | "next" => {
                let shown = navigator
                    .show_next()
                    .map(|(author, post)| (author.to_string(), post));
                if shown.is_none() {
                    println!("No older posts.");
                }
                shown
            }
            "p" | "prev" | "previous" => {
                let shown = navigator
                    .show_previous()
                    .map(|(author, post)| (author.to_string(), post));
                if shown.is_none() {
                    println!("No newer posts.");
                }
                shown
            }
            "f" | "first" => navigator
                .show_first()
                .map(|(author, post)| (author.to_string(), post)),
            "b" | "back" => return Ok(BrowseExit::Back),
            "quit" | "exit" => return Ok(BrowseExit::Quit),
            "" => continue,
            _ => {
                println!("Use n, p, f or b.");
                continue;
            }
        };
        if let Some((author, post)) = shown {
            render(navigator.current_index(), &author, post);
        }
        render_controls(&navigator);
    }
}

fn login(directory: &Directory, name: &str, current_user: &mut Option<String>) {
    match directory.get_user(name) {
        Ok(user) => {
            *current_user = Some(user.name().to_string());
            println!("Congratulations {}! You are now logged.", user.name());
        }
        Err(e) => println!("{}", e),
    }
}

fn main() {
    let (config, config_error) = load_config_or_default(DEFAULT_CONFIG_PATH);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    if let Some(e) = config_error {
        warn!("{}, using default configuration", e);
    }

    let mut directory = match &config.seed_file {
        Some(path) => match Directory::load_seed(path) {
            Ok(directory) => directory,
            Err(e) => {
                warn!("{}, starting with an empty directory", e);
                Directory::new()
            }
        },
        None => Directory::new(),
    };

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            return;
        }
    };

    let mut current_user: Option<String> = None;
    if let Some(name) = &config.user {
        login(&directory, name, &mut current_user);
    }

    println!("\nCurrent Configuration:");
    println!("  Seed File: {}", config.seed_file.as_deref().unwrap_or("-"));
    println!("  Users:     {}", directory.len());
    println!("\nType 'help' for commands or 'exit' to quit.\n");

    loop {
        let prompt = match &current_user {
            Some(name) => format!("{}> ", name),
            None => "> ".to_string(),
        };
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let (command, argument) = match line.split_once(char::is_whitespace) {
                    Some((command, rest)) => (command, rest.trim()),
                    None => (line, ""),
                };

                let session_user = current_user.clone();
                match (command, session_user.as_deref()) {
                    ("help", _) => print_help(),
                    ("users", _) => {
                        for name in directory.user_names() {
                            println!("{}", name);
                        }
                    }
                    ("create", _) => match directory.add_user(argument) {
                        Ok(user) => println!("Congratulations {}! Now you can log in.", user.name()),
                        Err(e) => println!("{}", e),
                    },
                    ("login", _) => login(&directory, argument, &mut current_user),
                    ("quit" | "exit", _) => {
                        println!("Goodbye!");
                        break;
                    }
                    (_, None) => println!("Log in first. Type help if you want to see the valid commands"),
                    ("logout", Some(_)) => current_user = None,
                    ("whoami", Some(name)) => println!("{}", name),
                    ("post", Some(name)) => match directory.publish(name, argument) {
                        Ok(()) => println!("Message posted."),
                        Err(e) => println!("{}", e),
                    },
                    ("follow", Some(name)) => match directory.follow(name, argument) {
                        Ok(true) => println!("You now follow {}.", argument),
                        Ok(false) => println!("You already follow {}.", argument),
                        Err(e) => println!("{}", e),
                    },
                    ("unfollow", Some(name)) => match directory.unfollow(name, argument) {
                        Ok(true) => println!("You no longer follow {}.", argument),
                        Ok(false) => println!("You were not following {}.", argument),
                        Err(e) => println!("{}", e),
                    },
                    ("following", Some(name)) => {
                        if let Ok(user) = directory.get_user(name) {
                            for followed in user.following() {
                                println!("{}", followed);
                            }
                        }
                    }
                    ("feed" | "timeline", Some(name)) => {
                        match browse(&mut rl, &directory, name, command == "timeline") {
                            Ok(BrowseExit::Back) => {}
                            Ok(BrowseExit::Quit) => {
                                println!("Goodbye!");
                                break;
                            }
                            Err(err) => {
                                println!("Error: {:?}", err);
                                break;
                            }
                        }
                    }
                    _ => {
                        println!(
                            "Invalid command. Type help if you want to see the valid commands"
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
}
