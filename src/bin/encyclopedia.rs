//! Runs the encyclopedia producers and a consumer in one process.

use std::{env, io, process};
use std::io::Write;
use std::str::FromStr;
use chrono::TimeDelta;
use ndn_cert::encyclopedia::{
    create_identity, serve_certificate, Consumer, MenuChoiceError, Producer,
    ProducerConfig, Topic
};
use ndn_cert::face::LocalFace;
use ndn_cert::validator::TrustAnchors;


fn usage() -> ! {
    eprintln!(
        "USAGE: encyclopedia [<type>...]\n\
         Valid types:\n\tndn\n\tpenguin\n\tdinosaur"
    );
    process::exit(2)
}

fn main() {
    // Which topics to serve. All of them if none are given.
    let mut topics = Vec::new();
    for arg in env::args().skip(1) {
        match Topic::from_str(&arg) {
            Ok(topic) => topics.push(topic),
            Err(_) => usage()
        }
    }
    if topics.is_empty() {
        topics.extend(Topic::ALL)
    }

    // Each producer signs with its own key and serves its certificate.
    let mut face = LocalFace::new();
    let mut cert_names = Vec::new();
    for topic in topics {
        let config = ProducerConfig::for_topic(topic);
        println!("{}", config.prefix);
        println!("{}", config.content);
        let (signer, cert) = match create_identity(
            &config.prefix, TimeDelta::days(365)
        ) {
            Ok(res) => res,
            Err(err) => {
                eprintln!("Failed to create key for {}: {}", topic, err);
                process::exit(1)
            }
        };
        if let Err(err) = serve_certificate(&mut face, &cert) {
            eprintln!("Failed to serve certificate {}: {}", cert.name(), err);
            process::exit(1)
        }
        cert_names.push(cert.name().clone());
        Producer::new(config, signer, cert.name().clone()).register(&mut face);
    }

    let topic = match ask() {
        Ok(topic) => topic,
        Err(err) => {
            eprintln!("You must answer with 1, 2, or 3. ({})", err);
            process::exit(1)
        }
    };

    // The consumer trusts the certificates it finds being served.
    let mut consumer = Consumer::new(face, TrustAnchors::new());
    for name in cert_names {
        match consumer.fetch_certificate(name) {
            Ok(cert) => consumer.validator_mut().add(cert),
            Err(err) => {
                println!("{}", err);
                process::exit(1)
            }
        }
    }
    match consumer.fetch(topic) {
        Ok(text) => {
            println!("\n\nYour requested information:\n");
            println!("{}", text);
        }
        Err(err) => {
            println!("{}", err);
            process::exit(1)
        }
    }
}

fn ask() -> Result<Topic, MenuChoiceError> {
    println!("What data would you like?");
    for topic in Topic::ALL {
        println!("[{}] {}", topic.menu_choice(), topic.description());
    }
    print!("Your answer: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return Err(MenuChoiceError::NotANumber)
    }
    Topic::from_menu_choice(&line)
}
