//! A tiny encyclopedia served over a face.
//!
//! This is the sample application: a [`Producer`] answers interests for a
//! [`Topic`] with a signed piece of text and a [`Consumer`] asks for a
//! topic, validates the answer, and hands back the text.

use std::{error, fmt, str};
use std::time::Duration;
use chrono::TimeDelta;
use log::{debug, error, info};
use crate::cert::{Certificate, SubjectDescription};
use crate::crypto::{KeyError, PublicKeyFormat, Signer, SoftSigner};
use crate::data::Data;
use crate::error::{DecodingError, EncodingError, ValidationError};
use crate::face::{Face, FilterId, Interest, NackReason, Response};
use crate::name::Name;
use crate::oid;
use crate::validator::Validator;
use crate::x509::{ObjectId, Validity};


//------------ Topic ---------------------------------------------------------

/// The topics the encyclopedia knows about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Topic {
    Ndn,
    Penguin,
    Dinosaur,
}

impl Topic {
    /// All topics in menu order.
    pub const ALL: [Topic; 3] = [Topic::Ndn, Topic::Penguin, Topic::Dinosaur];

    /// Converts the answer to the topic menu into a topic.
    ///
    /// The answer must be one of the numbers 1 to 3. Surrounding white
    /// space is ignored.
    pub fn from_menu_choice(choice: &str) -> Result<Self, MenuChoiceError> {
        let choice = choice.trim().parse::<i64>().map_err(|_| {
            MenuChoiceError::NotANumber
        })?;
        match choice {
            1 => Ok(Topic::Ndn),
            2 => Ok(Topic::Penguin),
            3 => Ok(Topic::Dinosaur),
            _ => Err(MenuChoiceError::OutOfRange(choice))
        }
    }

    /// Returns the number of the topic in the menu.
    pub fn menu_choice(self) -> usize {
        match self {
            Topic::Ndn => 1,
            Topic::Penguin => 2,
            Topic::Dinosaur => 3,
        }
    }

    /// Returns the keyword used in names and on the command line.
    pub fn keyword(self) -> &'static str {
        match self {
            Topic::Ndn => "ndn",
            Topic::Penguin => "penguin",
            Topic::Dinosaur => "dinosaur",
        }
    }

    /// Returns the menu entry for the topic.
    pub fn description(self) -> &'static str {
        match self {
            Topic::Ndn => "Information about NDN",
            Topic::Penguin => "Information about the penguins",
            Topic::Dinosaur => "Information about dinosaurs",
        }
    }

    /// Returns the text the encyclopedia has on the topic.
    pub fn content(self) -> &'static str {
        match self {
            Topic::Ndn => {
                "NDN is a network layer protocol centered around naming data."
            }
            Topic::Penguin => {
                "The emperor penguin is the largest of all penguins on Earth."
            }
            Topic::Dinosaur => {
                "Dinosaurs inhabited the Earth a long time ago."
            }
        }
    }

    /// Returns the prefix the producer for the topic registers.
    pub fn prefix(self) -> Name {
        Name::new().append("example").append(self.keyword())
    }

    /// Returns the name consumers ask for.
    pub fn request_name(self) -> Name {
        self.prefix().append("information")
    }
}

impl str::FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL.iter().copied().find(|topic| {
            topic.keyword() == s
        }).ok_or(UnknownTopic)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}


//------------ ProducerConfig ------------------------------------------------

/// What a producer serves and how.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ProducerConfig {
    /// The prefix to answer interests for.
    pub prefix: Name,

    /// The content of every data packet.
    pub content: String,

    /// How long caches may consider the data fresh.
    pub freshness_period: Duration,
}

impl ProducerConfig {
    /// The freshness period of the data unless configured otherwise.
    pub const DEFAULT_FRESHNESS_PERIOD: Duration = Duration::from_secs(10);

    pub fn new(prefix: Name, content: impl Into<String>) -> Self {
        ProducerConfig {
            prefix,
            content: content.into(),
            freshness_period: Self::DEFAULT_FRESHNESS_PERIOD,
        }
    }

    /// Returns the configuration for serving a topic.
    pub fn for_topic(topic: Topic) -> Self {
        Self::new(topic.prefix(), topic.content())
    }
}


//------------ Producer ------------------------------------------------------

/// Answers interests with signed data.
pub struct Producer<S: Signer> {
    config: ProducerConfig,
    signer: S,
    key: S::KeyId,
}

impl<S: Signer> Producer<S> {
    pub fn new(config: ProducerConfig, signer: S, key: S::KeyId) -> Self {
        Producer { config, signer, key }
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Produces the answer to an interest.
    ///
    /// Returns `None` if the interest isn’t for the producer’s prefix or
    /// signing fails.
    pub fn respond(&self, interest: &Interest) -> Option<Data> {
        if !self.config.prefix.is_prefix_of(interest.name()) {
            return None
        }
        let mut data = Data::with_content(
            interest.name().clone(), self.config.content.clone()
        );
        data.set_freshness_period(Some(self.config.freshness_period));
        if let Err(err) = data.sign(&self.signer, &self.key) {
            error!("Failed to sign data {}: {}", data.name(), err);
            return None
        }
        debug!("Producing {}", data.name());
        Some(data)
    }

    /// Registers the producer with a face.
    pub fn register<F: Face + ?Sized>(self, face: &mut F) -> FilterId
    where S: 'static, S::KeyId: 'static {
        let prefix = self.config.prefix.clone();
        info!("Serving {}", prefix);
        face.set_interest_filter(
            prefix, Box::new(move |interest| self.respond(interest))
        )
    }
}

impl<S: Signer + fmt::Debug> fmt::Debug for Producer<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Producer")
            .field("config", &self.config)
            .field("signer", &self.signer)
            .finish()
    }
}


/// Creates the signing key and certificate for a producer.
///
/// The key is a new ECDSA P-256 key named `<prefix>/KEY/1`. The
/// certificate has the same name, is valid from now for `validity`, and
/// names the prefix as its subject. Use the key name as the key id when
/// signing with the returned signer.
pub fn create_identity(
    prefix: &Name, validity: TimeDelta
) -> Result<(SoftSigner, Certificate), KeyError> {
    let key_name = prefix.clone().append("KEY").append("1");
    let mut signer = SoftSigner::new();
    signer.create_key(key_name.clone(), PublicKeyFormat::EcdsaP256)?;
    let mut cert = Certificate::new(key_name.clone());
    cert.set_validity(Validity::from_duration(validity));
    cert.add_subject_description(SubjectDescription::new(
        ObjectId::from_oid(&oid::AT_NAME), prefix.to_string()
    ));
    cert.set_public_key_info(signer.public_key(&key_name)?.to_info_bytes());
    info!("Created identity {}", key_name);
    Ok((signer, cert))
}

/// Makes a certificate available via a face.
///
/// Interests for the certificate’s name are answered with the encoded
/// certificate.
pub fn serve_certificate<F: Face + ?Sized>(
    face: &mut F, cert: &Certificate
) -> Result<FilterId, EncodingError> {
    let data = Data::with_content(cert.name().clone(), cert.to_bytes()?);
    info!("Serving certificate {}", cert.name());
    Ok(face.set_interest_filter(
        cert.name().clone(), Box::new(move |_| Some(data.clone()))
    ))
}


//------------ Consumer ------------------------------------------------------

/// Fetches and validates encyclopedia entries.
#[derive(Debug)]
pub struct Consumer<F, V> {
    face: F,
    validator: V,
}

impl<F: Face, V: Validator> Consumer<F, V> {
    pub fn new(face: F, validator: V) -> Self {
        Consumer { face, validator }
    }

    pub fn face_mut(&mut self) -> &mut F {
        &mut self.face
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }

    /// Fetches the text on a topic.
    pub fn fetch(&mut self, topic: Topic) -> Result<String, FetchError> {
        self.fetch_name(topic.request_name())
    }

    /// Fetches the data named `name` and returns its content as text.
    pub fn fetch_name(&mut self, name: Name) -> Result<String, FetchError> {
        let data = self.express(name)?;
        self.validator.validate(&data).map_err(FetchError::Validation)?;
        String::from_utf8(data.content().to_vec()).map_err(|_| {
            FetchError::NotText(data.name().clone())
        })
    }

    /// Fetches the certificate named `name`.
    ///
    /// The certificate isn’t validated. It is meant to become a trust
    /// anchor.
    pub fn fetch_certificate(
        &mut self, name: Name
    ) -> Result<Certificate, FetchError> {
        let data = self.express(name)?;
        Certificate::from_data(&data).map_err(FetchError::Certificate)
    }

    fn express(&mut self, name: Name) -> Result<Data, FetchError> {
        let interest = Interest::new(name);
        info!("Sending Interest {}", interest);
        let data = match self.face.express_interest(&interest) {
            Response::Data(data) => data,
            Response::Nack(reason) => return Err(FetchError::Nack(reason)),
            Response::Timeout => return Err(FetchError::Timeout(interest)),
        };
        info!("Received Data {}", data.name());
        Ok(data)
    }

    pub fn into_parts(self) -> (F, V) {
        (self.face, self.validator)
    }
}


//------------ MenuChoiceError -----------------------------------------------

/// The answer to the topic menu was not acceptable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuChoiceError {
    /// The answer wasn’t a number at all.
    NotANumber,

    /// The number is not on the menu.
    OutOfRange(i64),
}

impl fmt::Display for MenuChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MenuChoiceError::NotANumber => f.write_str("not a number"),
            MenuChoiceError::OutOfRange(choice) => {
                write!(f, "{} is not on the menu", choice)
            }
        }
    }
}

impl error::Error for MenuChoiceError { }


//------------ UnknownTopic --------------------------------------------------

/// A string didn’t name a topic.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UnknownTopic;

impl fmt::Display for UnknownTopic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown topic")
    }
}

impl error::Error for UnknownTopic { }


//------------ FetchError ----------------------------------------------------

/// Fetching an encyclopedia entry failed.
#[derive(Debug)]
pub enum FetchError {
    /// The network refused the interest.
    Nack(NackReason),

    /// No data arrived in time.
    Timeout(Interest),

    /// The data arrived but was rejected by the validator.
    Validation(ValidationError),

    /// The content of the data isn’t UTF-8 text.
    NotText(Name),

    /// The content of the data isn’t a certificate.
    Certificate(DecodingError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FetchError::Nack(reason) => {
                write!(f, "Received Nack with reason {}", reason)
            }
            FetchError::Timeout(ref interest) => {
                write!(f, "Timeout for {}", interest)
            }
            FetchError::Validation(ref err) => {
                write!(f, "Error authenticating data: {}", err)
            }
            FetchError::NotText(ref name) => {
                write!(f, "Content of {} is not text", name)
            }
            FetchError::Certificate(ref err) => {
                write!(f, "Invalid certificate: {}", err)
            }
        }
    }
}

impl error::Error for FetchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            FetchError::Validation(ref err) => Some(err),
            FetchError::Certificate(ref err) => Some(err),
            _ => None
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use std::convert::Infallible;
    use bytes::Bytes;
    use crate::crypto::{DigestSigner, SigningError};
    use crate::data::{SignatureInfo, SignatureType};
    use crate::face::LocalFace;
    use crate::validator::{AcceptAll, TrustAnchors};
    use crate::x509::Time;

    /// Claims to sign with a key nobody knows.
    struct BogusSigner;

    impl Signer for BogusSigner {
        type KeyId = ();
        type Error = Infallible;

        fn signature_info(
            &self, _key: &()
        ) -> Result<SignatureInfo, SigningError<Infallible>> {
            Ok(SignatureInfo::new(
                SignatureType::Sha256WithRsa,
                Some(Name::from_str("/example/KEY/bogus").unwrap())
            ))
        }

        fn sign<D: AsRef<[u8]> + ?Sized>(
            &self, _key: &(), _data: &D
        ) -> Result<Bytes, SigningError<Infallible>> {
            Ok(Bytes::from_static(&[0; 256]))
        }
    }

    /// Returns a face with signing producers and their certificates.
    fn face_with_all_topics() -> (LocalFace, Vec<Certificate>) {
        let mut face = LocalFace::new();
        let mut certs = Vec::new();
        for topic in Topic::ALL {
            let (signer, cert) = create_identity(
                &topic.prefix(), TimeDelta::try_days(1).unwrap()
            ).unwrap();
            Producer::new(
                ProducerConfig::for_topic(topic), signer, cert.name().clone()
            ).register(&mut face);
            serve_certificate(&mut face, &cert).unwrap();
            certs.push(cert);
        }
        (face, certs)
    }

    #[test]
    fn menu_choices() {
        assert_eq!(Topic::from_menu_choice("1"), Ok(Topic::Ndn));
        assert_eq!(Topic::from_menu_choice(" 2\n"), Ok(Topic::Penguin));
        assert_eq!(Topic::from_menu_choice("3"), Ok(Topic::Dinosaur));
        assert_eq!(
            Topic::from_menu_choice("0"), Err(MenuChoiceError::OutOfRange(0))
        );
        assert_eq!(
            Topic::from_menu_choice("-7"),
            Err(MenuChoiceError::OutOfRange(-7))
        );
        assert_eq!(
            Topic::from_menu_choice("penguin"),
            Err(MenuChoiceError::NotANumber)
        );
        assert_eq!(
            Topic::from_menu_choice(""), Err(MenuChoiceError::NotANumber)
        );
        for topic in Topic::ALL {
            assert_eq!(
                Topic::from_menu_choice(&topic.menu_choice().to_string()),
                Ok(topic)
            );
        }
    }

    #[test]
    fn topic_keywords() {
        assert_eq!(Topic::from_str("ndn"), Ok(Topic::Ndn));
        assert_eq!(Topic::from_str("penguin"), Ok(Topic::Penguin));
        assert_eq!(Topic::from_str("dinosaur"), Ok(Topic::Dinosaur));
        assert_eq!(Topic::from_str("dinosaurs"), Err(UnknownTopic));
        assert_eq!(Topic::from_str("nd"), Err(UnknownTopic));
        assert_eq!(Topic::from_str("unicorn"), Err(UnknownTopic));
        assert_eq!(
            Topic::Penguin.request_name().to_string(),
            "/example/penguin/information"
        );
    }

    #[test]
    fn producer_responds() {
        let producer = Producer::new(
            ProducerConfig::for_topic(Topic::Ndn), DigestSigner, ()
        );
        let data = producer.respond(
            &Interest::new(Topic::Ndn.request_name())
        ).unwrap();
        assert_eq!(data.content().as_ref(), Topic::Ndn.content().as_bytes());
        assert_eq!(data.freshness_period(), Some(Duration::from_secs(10)));
        assert_eq!(
            data.signature().unwrap().info().signature_type(),
            SignatureType::DigestSha256
        );
        assert!(
            producer.respond(&Interest::new(Topic::Penguin.request_name()))
                .is_none()
        );
    }

    #[test]
    fn fetch_all_topics() {
        let (mut face, certs) = face_with_all_topics();
        let mut consumer = Consumer::new(&mut face, TrustAnchors::new());

        // Nothing is trusted yet.
        match consumer.fetch(Topic::Ndn) {
            Err(FetchError::Validation(err)) => assert!(err.is_unknown_key()),
            res => panic!("unexpected result {:?}", res)
        }

        for cert in &certs {
            let fetched = consumer.fetch_certificate(
                cert.name().clone()
            ).unwrap();
            assert_eq!(&fetched, cert);
            consumer.validator_mut().add(fetched);
        }
        for topic in Topic::ALL {
            assert_eq!(consumer.fetch(topic).unwrap(), topic.content());
        }
    }

    #[test]
    fn create_identity_certificate() {
        let prefix = Topic::Penguin.prefix();
        let (signer, mut cert) = create_identity(
            &prefix, TimeDelta::try_days(1).unwrap()
        ).unwrap();
        assert_eq!(cert.name().to_string(), "/example/penguin/KEY/1");
        assert_eq!(
            cert.subject_descriptions()[0].value(), "/example/penguin"
        );
        assert_eq!(
            cert.public_key_info().to_public_key().unwrap(),
            signer.public_key(cert.name()).unwrap()
        );
        cert.validity().verify_at(Time::now()).unwrap();
        let data = cert.to_data().unwrap();
        assert_eq!(Certificate::from_data(&data).unwrap(), cert);
    }

    #[test]
    fn fetch_digest_signed() {
        let mut face = LocalFace::new();
        Producer::new(
            ProducerConfig::for_topic(Topic::Ndn), DigestSigner, ()
        ).register(&mut face);
        let mut consumer = Consumer::new(face, TrustAnchors::new());
        match consumer.fetch(Topic::Ndn) {
            Err(FetchError::Validation(err)) => assert!(err.is_unsupported()),
            res => panic!("unexpected result {:?}", res)
        }

        consumer.validator_mut().set_accept_digest(true);
        assert_eq!(consumer.fetch(Topic::Ndn).unwrap(), Topic::Ndn.content());

        // Text isn’t a certificate.
        assert!(matches!(
            consumer.fetch_certificate(Topic::Ndn.request_name()),
            Err(FetchError::Certificate(_))
        ));
    }

    #[test]
    fn fetch_nack() {
        let mut consumer = Consumer::new(LocalFace::new(), AcceptAll);
        assert!(matches!(
            consumer.fetch(Topic::Ndn),
            Err(FetchError::Nack(NackReason::NoRoute))
        ));
    }

    #[test]
    fn fetch_timeout() {
        let mut face = LocalFace::new();
        face.set_interest_filter(Topic::Ndn.prefix(), Box::new(|_| None));
        let mut consumer = Consumer::new(face, AcceptAll);
        let err = consumer.fetch(Topic::Ndn).unwrap_err();
        assert_eq!(
            err.to_string(), "Timeout for /example/ndn/information"
        );
    }

    #[test]
    fn fetch_rejected() {
        let mut face = LocalFace::new();
        Producer::new(
            ProducerConfig::for_topic(Topic::Dinosaur), BogusSigner, ()
        ).register(&mut face);
        let mut consumer = Consumer::new(face, TrustAnchors::new());
        match consumer.fetch(Topic::Dinosaur) {
            Err(FetchError::Validation(err)) => assert!(err.is_unknown_key()),
            res => panic!("unexpected result {:?}", res)
        }

        // The same data is fine for a trusting consumer.
        let (face, _) = consumer.into_parts();
        let mut consumer = Consumer::new(face, AcceptAll);
        assert_eq!(
            consumer.fetch(Topic::Dinosaur).unwrap(),
            Topic::Dinosaur.content()
        );
    }

    #[test]
    fn fetch_not_text() {
        let mut face = LocalFace::new();
        face.set_interest_filter(
            Name::from_str("/binary").unwrap(),
            Box::new(|interest| {
                Some(Data::with_content(
                    interest.name().clone(), &b"\xff\xfe"[..]
                ))
            })
        );
        let mut consumer = Consumer::new(face, AcceptAll);
        assert!(matches!(
            consumer.fetch_name(Name::from_str("/binary").unwrap()),
            Err(FetchError::NotText(_))
        ));
    }

    #[test]
    fn serve_and_fetch_certificate() {
        let mut cert = Certificate::new(
            Name::from_str("/example/ndn/KEY/2").unwrap()
        );
        cert.set_not_before(Time::from_millis(1388100174000).unwrap());
        cert.set_not_after(Time::from_millis(1419636174000).unwrap());
        cert.add_subject_description(SubjectDescription::new(
            ObjectId::from_str("2.5.4.41").unwrap(), "Encyclopedia"
        ));
        cert.set_public_key_info(
            &include_bytes!("../test-data/ndn/pubkey.der")[..]
        );

        let (mut face, _) = face_with_all_topics();
        serve_certificate(&mut face, &cert).unwrap();

        let data = face.express_interest(
            &Interest::new(cert.name().clone())
        ).into_data().unwrap();
        assert_eq!(Certificate::from_data(&data).unwrap(), cert);

        // The topic is still served by the producer.
        let mut consumer = Consumer::new(&mut face, AcceptAll);
        assert_eq!(
            consumer.fetch(Topic::Ndn).unwrap(), Topic::Ndn.content()
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn producer_config_serde() {
        let config = ProducerConfig::for_topic(Topic::Penguin);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            serde_json::from_str::<ProducerConfig>(&json).unwrap(), config
        );
    }
}
