//! The fixed passages seeded into storage on every run

/// Example documents, inserted in this order
pub const CORPUS: [&str; 3] = [
    "The Riverside Chess Club meets every Thursday at 7pm in the community library. \
     New members of all skill levels are welcome and the first visit is free.",
    "The office cafeteria serves breakfast from 7:30 to 10:00 and lunch from 12:00 to 14:00 \
     on weekdays. Vegetarian options are available every day.",
    "Expense reports must be submitted through the finance portal within 30 days of purchase, \
     with a scanned receipt attached for every item over 25 dollars.",
];
