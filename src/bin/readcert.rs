use std::{env, fs, process};
use std::str::FromStr;
use bytes::Bytes;
use ndn_cert::cert::Certificate;
use ndn_cert::name::Name;


fn main() {
    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: readcert <path> [<name>]");
            process::exit(2)
        }
    };
    let name = match args.next() {
        Some(name) => match Name::from_str(&name) {
            Ok(name) => name,
            Err(err) => {
                eprintln!("Invalid certificate name '{}': {}", name, err);
                process::exit(2)
            }
        }
        None => Name::new()
    };
    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Can’t read file {}: {}", path, err);
            process::exit(1)
        }
    };
    let cert = match Certificate::decode(name, Bytes::from(data)) {
        Ok(cert) => cert,
        Err(err) => {
            eprintln!("Can’t decode cert: {}", err);
            process::exit(1)
        }
    };
    print!("{}", cert);
}
