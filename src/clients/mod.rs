pub mod scrapbox;
