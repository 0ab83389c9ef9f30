quantity!(
    /// Tariff in dollars per kilowatt-hour.
    KilowattHourPrice, via: f64, suffix: "$/kWh", precision: 3
);
