//! Exchanging interests and data.
//!
//! A [`Face`] is the point where an application meets the network. It
//! sends out interests and delivers the response, and it passes incoming
//! interests to handlers registered for a name prefix.
//!
//! Only an in-process face, [`LocalFace`], is provided. It connects
//! consumers and producers living in the same process, which is all the
//! sample application and tests need. Forwarding strategies and caching
//! are left to a real forwarder.

use std::{error, fmt};
use std::collections::VecDeque;
use std::time::Duration;
use log::{debug, trace};
use crate::data::Data;
use crate::name::Name;


//------------ Interest ------------------------------------------------------

/// A request for data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interest {
    name: Name,
    can_be_prefix: bool,
    must_be_fresh: bool,
    lifetime: Duration,
}

impl Interest {
    /// The lifetime of an interest unless set explicitly.
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(4);

    pub fn new(name: Name) -> Self {
        Interest {
            name,
            can_be_prefix: false,
            must_be_fresh: false,
            lifetime: Self::DEFAULT_LIFETIME,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns whether data with a longer name satisfies the interest.
    pub fn can_be_prefix(&self) -> bool {
        self.can_be_prefix
    }

    pub fn set_can_be_prefix(&mut self, value: bool) {
        self.can_be_prefix = value
    }

    /// Returns whether stale data from a cache is acceptable.
    pub fn must_be_fresh(&self) -> bool {
        self.must_be_fresh
    }

    pub fn set_must_be_fresh(&mut self, value: bool) {
        self.must_be_fresh = value
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime
    }

    /// Returns whether `data` satisfies the interest.
    pub fn matches_data(&self, data: &Data) -> bool {
        if self.can_be_prefix {
            self.name.is_prefix_of(data.name())
        }
        else {
            self.name == *data.name()
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let mut sep = '?';
        if self.can_be_prefix {
            write!(f, "{}CanBePrefix", sep)?;
            sep = '&';
        }
        if self.must_be_fresh {
            write!(f, "{}MustBeFresh", sep)?;
            sep = '&';
        }
        if self.lifetime != Self::DEFAULT_LIFETIME {
            write!(
                f, "{}InterestLifetime={}", sep, self.lifetime.as_millis()
            )?;
        }
        Ok(())
    }
}


//------------ NackReason ----------------------------------------------------

/// The reason why the network refused an interest.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NackReason {
    /// There is no route for the name.
    NoRoute,

    /// The network is congested.
    Congestion,

    /// The interest was a duplicate of one already pending.
    Duplicate,
}

impl fmt::Display for NackReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NackReason::NoRoute => "NoRoute",
            NackReason::Congestion => "Congestion",
            NackReason::Duplicate => "Duplicate",
        })
    }
}

impl error::Error for NackReason { }


//------------ Response ------------------------------------------------------

/// The outcome of expressing an interest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// Data satisfying the interest has arrived.
    Data(Data),

    /// The network refused the interest.
    Nack(NackReason),

    /// Nothing arrived within the lifetime of the interest.
    Timeout,
}

impl Response {
    pub fn into_data(self) -> Option<Data> {
        match self {
            Response::Data(data) => Some(data),
            _ => None
        }
    }
}


//------------ FilterId ------------------------------------------------------

/// Identifies a registered interest filter.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FilterId(u64);


//------------ InterestHandler -----------------------------------------------

/// A function answering interests for a prefix.
///
/// The handler returns the data to send back or `None` if it has no
/// answer, in which case the interest times out.
pub type InterestHandler = Box<dyn FnMut(&Interest) -> Option<Data>>;


//------------ Face ----------------------------------------------------------

/// A type that can exchange interests and data.
pub trait Face {
    /// Expresses an interest and waits for the response.
    fn express_interest(&mut self, interest: &Interest) -> Response;

    /// Registers a handler for interests under `prefix`.
    fn set_interest_filter(
        &mut self, prefix: Name, handler: InterestHandler
    ) -> FilterId;

    /// Removes a previously registered handler.
    ///
    /// Returns whether the filter existed.
    fn unset_interest_filter(&mut self, id: FilterId) -> bool;

    /// Makes data available to the network without an interest.
    fn put(&mut self, data: Data);
}

impl<F: Face + ?Sized> Face for &mut F {
    fn express_interest(&mut self, interest: &Interest) -> Response {
        (**self).express_interest(interest)
    }

    fn set_interest_filter(
        &mut self, prefix: Name, handler: InterestHandler
    ) -> FilterId {
        (**self).set_interest_filter(prefix, handler)
    }

    fn unset_interest_filter(&mut self, id: FilterId) -> bool {
        (**self).unset_interest_filter(id)
    }

    fn put(&mut self, data: Data) {
        (**self).put(data)
    }
}


//------------ LocalFace -----------------------------------------------------

/// A face connecting consumers and producers inside one process.
///
/// Interests are passed to the handler with the longest prefix of the
/// interest’s name. Data passed to [`put`][Face::put] is held until an
/// interest asks for it and is then delivered once. Nothing else is kept.
pub struct LocalFace {
    /// Data waiting for an interest, oldest first.
    pending: Vec<Data>,

    filters: Vec<Filter>,
    next_id: u64,
}

struct Filter {
    id: FilterId,
    prefix: Name,
    handler: InterestHandler,
}

impl LocalFace {
    pub fn new() -> Self {
        LocalFace {
            pending: Vec::new(),
            filters: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the number of put data packets not yet delivered.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn take_pending(&mut self, interest: &Interest) -> Option<Data> {
        let pos = self.pending.iter().position(|data| {
            interest.matches_data(data)
        })?;
        Some(self.pending.remove(pos))
    }
}

impl Default for LocalFace {
    fn default() -> Self {
        Self::new()
    }
}

impl Face for LocalFace {
    fn express_interest(&mut self, interest: &Interest) -> Response {
        debug!(">> I: {}", interest);
        if let Some(data) = self.take_pending(interest) {
            debug!("<< D: {} (put)", data.name());
            return Response::Data(data)
        }
        let filter = self.filters.iter_mut().filter(|filter| {
            filter.prefix.is_prefix_of(interest.name())
        }).max_by_key(|filter| filter.prefix.len());
        let filter = match filter {
            Some(filter) => filter,
            None => {
                debug!("<< N: {} {}", interest.name(), NackReason::NoRoute);
                return Response::Nack(NackReason::NoRoute)
            }
        };
        let data = match (filter.handler)(interest) {
            Some(data) => data,
            None => {
                debug!("<< T: {}", interest.name());
                return Response::Timeout
            }
        };
        if !interest.matches_data(&data) {
            debug!(
                "Dropping data {} not matching interest {}",
                data.name(), interest
            );
            return Response::Timeout
        }
        debug!("<< D: {}", data.name());
        Response::Data(data)
    }

    fn set_interest_filter(
        &mut self, prefix: Name, handler: InterestHandler
    ) -> FilterId {
        let id = FilterId(self.next_id);
        self.next_id += 1;
        debug!("Registered filter for {}", prefix);
        self.filters.push(Filter { id, prefix, handler });
        id
    }

    fn unset_interest_filter(&mut self, id: FilterId) -> bool {
        let len = self.filters.len();
        self.filters.retain(|filter| filter.id != id);
        len != self.filters.len()
    }

    fn put(&mut self, data: Data) {
        trace!("Holding {} until asked for", data.name());
        self.pending.push(data)
    }
}

impl fmt::Debug for LocalFace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LocalFace")
            .field("pending", &self.pending.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}


//============ Tests =========================================================
