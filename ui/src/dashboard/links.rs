//! Deep links into booking sites for a concrete offer.

use crate::snapshot::{Offer, RouteSpec};

pub(crate) fn google_flights_link(route: &RouteSpec, offer: &Offer) -> String {
    let currency = if route.currency.is_empty() {
        "ILS"
    } else {
        route.currency.as_str()
    };
    format!(
        "https://www.google.com/travel/flights?curr={currency}&flt={origin}.{dest}.{depart}*{dest}.{origin}.{ret};tt=m;ad={adults}",
        origin = route.origin,
        dest = route.destination,
        depart = offer.depart,
        ret = offer.return_date,
        adults = route.adults.max(1),
    )
}

pub(crate) fn skyscanner_link(route: &RouteSpec, offer: &Offer) -> String {
    format!(
        "https://www.skyscanner.com/transport/flights/{}/{}/{}/{}/?adultsv2={}",
        route.origin.to_lowercase(),
        route.destination.to_lowercase(),
        offer.depart,
        offer.return_date,
        route.adults.max(1),
    )
}

pub(crate) fn kayak_link(route: &RouteSpec, offer: &Offer) -> String {
    format!(
        "https://www.kayak.com/flights/{}-{}/{}/{}?adults={}",
        route.origin,
        route.destination,
        offer.depart,
        offer.return_date,
        route.adults.max(1),
    )
}
