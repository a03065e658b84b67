use s3bucket::cli::{Console, Session, start};
use std::{io, process};

#[tokio::main]
async fn main() {
    let (s3, bucket) = match start() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    };

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::new(s3, console);

    if let Err(e) = session.run(bucket.as_deref()).await {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
