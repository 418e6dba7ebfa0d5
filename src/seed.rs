//! Built-in default knowledge documents.
//!
//! The retriever guarantees a non-empty index on first run: when the
//! knowledge directory is empty or absent, these documents are written into
//! it (as plain `.txt` files users can edit) before scanning. Existing
//! files are never overwritten.

use std::io;
use std::path::Path;

/// (file name, body) pairs written on first run.
pub const SEED_DOCUMENTS: &[(&str, &str)] = &[
    (
        "europe.txt",
        "TRAVEL TIPS FOR EUROPE\n\n\
         Visa and entry:\n\
         - US citizens may visit most EU countries visa-free for up to 90 days.\n\
         - ETIAS travel authorization is being phased in; check before departure.\n\
         - Entry rules differ per country, so confirm the specifics of each stop.\n\n\
         Money:\n\
         - The euro covers 20 EU countries; carry a little cash alongside cards.\n\
         - Tell your bank about travel dates to avoid blocked cards.\n\n\
         Getting around:\n\
         - Rail connects major cities well; a Eurail pass pays off on multi-country trips.\n\
         - Budget airlines are cheap between hubs, metros excellent within them.\n\n\
         Etiquette:\n\
         - Tip 5-10% in restaurants, varying by country.\n\
         - Dress modestly at religious sites and learn a few local phrases.\n",
    ),
    (
        "italy.txt",
        "ITALY TRAVEL GUIDE\n\n\
         Entry requirements:\n\
         - Italy requires a valid passport. Six months of validity beyond the\n\
           return date keeps border checks painless.\n\n\
         When to go:\n\
         - April to June brings pleasant weather and thinner crowds.\n\
         - September and October trade beaches for fall colors.\n\
         - August is peak season and many locals are themselves on vacation.\n\n\
         Cities:\n\
         - Rome rewards three to four days: ancient sites, the Vatican, the Colosseum.\n\
         - Florence holds the Renaissance core, Venice its canals, Milan the fashion week.\n\n\
         Food:\n\
         - Cappuccino is a morning drink; espresso after 11.\n\
         - Lunch runs 12:30-14:30, dinner starts after 20:00, and the coperto\n\
           cover charge of a few euro is normal, not a scam.\n\n\
         Trains:\n\
         - High-speed Trenitalia and Italo link the big cities; book ahead for\n\
           the best fares. City-center ZTL zones ban unpermitted cars.\n",
    ),
    (
        "paris.txt",
        "PARIS TRAVEL ESSENTIALS\n\n\
         Sights:\n\
         - Book Eiffel Tower and Louvre tickets online well in advance.\n\
         - Versailles takes a full day; Montmartre is free and best on foot.\n\n\
         Eating:\n\
         - Boulangeries bake fresh every morning; cafe terraces charge more\n\
           than the bar counter.\n\
         - Michelin tables book out two to three months ahead.\n\n\
         Getting around:\n\
         - The metro is fast; a carnet of tickets saves money.\n\
         - The Museum Pass skips lines at more than sixty attractions.\n\n\
         Notes:\n\
         - A little French goes a long way with locals.\n\
         - Many shops close on Sundays; pharmacies show a green cross.\n",
    ),
    (
        "packing.txt",
        "PACKING FOR INTERNATIONAL TRAVEL\n\n\
         Documents:\n\
         - Passport valid six months beyond travel, visas where required,\n\
           insurance papers, and digital plus paper copies of everything.\n\n\
         Clothing:\n\
         - Versatile layers, broken-in walking shoes, one dressier outfit.\n\n\
         Electronics:\n\
         - Universal power adapter, portable charger, offline maps downloaded.\n\n\
         Toiletries:\n\
         - Carry-on liquids at 3.4oz or less; medications in original containers.\n\n\
         Technique:\n\
         - Roll clothes, use packing cubes, wear the bulkiest items on the\n\
           plane, and leave room for souvenirs.\n",
    ),
    (
        "luxury.txt",
        "LUXURY TRAVEL NOTES\n\n\
         Stays:\n\
         - Five-star hotels and boutique properties; loyalty programs unlock\n\
           upgrades, private villas suit groups.\n\n\
         Dining:\n\
         - Michelin-starred restaurants want bookings months out; private\n\
           chefs and wine-pairing dinners fill the gaps.\n\n\
         Transport:\n\
         - Business or first class in the air, chauffeured transfers on the\n\
           ground, and the occasional luxury rail journey.\n\n\
         Experiences:\n\
         - After-hours museum tours, chateau tastings, helicopter flights,\n\
           yacht charters, spa retreats. A concierge arranges all of it.\n",
    ),
    (
        "honeymoon.txt",
        "HONEYMOON PLANNING GUIDE\n\n\
         Where:\n\
         - Italy for romance and food, the Maldives for overwater bungalows,\n\
           Paris for the cliche that works, Santorini for sunsets, Bali for\n\
           culture plus beaches.\n\n\
         Timeline:\n\
         - Six to nine months out: flights and rooms. Three to four months:\n\
           activities. One month: reconfirm everything.\n\n\
         Touches:\n\
         - Mention the honeymoon when booking; upgrades happen. Couples' spa\n\
           sessions, sunset cruises, and private dinners are worth it.\n\n\
         Budget:\n\
         - Shoulder season cuts prices. Mix one splurge with budget-friendly\n\
           days, buy travel insurance, and do not over-schedule.\n",
    ),
];

/// Write any seed documents missing from `dir`, creating the directory if
/// needed. Returns the number of files written.
pub fn write_seed_documents(dir: &Path) -> io::Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut written = 0;
    for (name, body) in SEED_DOCUMENTS {
        let path = dir.join(name);
        if !path.exists() {
            std::fs::write(&path, body)?;
            written += 1;
        }
    }
    Ok(written)
}
