// Rust guideline compliant 2026-10-12

//! Core data models for EstateHub.

use crate::error::ValidationError;
use crate::schema::{Entity, FieldValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declares a closed, snake_case-named enum with string conversions.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the snake_case name used in data files and the UI.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parses a name in any ASCII case, accepting `-` or space for `_`.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
                Self::ALL.iter().copied().find(|v| v.as_str() == normalized)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// The four kinds of managed record.
    RecordKind {
        /// A property listing.
        Listing => "listing",
        /// A lead or contact request.
        Inquiry => "inquiry",
        /// A console user account.
        Account => "account",
        /// A property amenity.
        Amenity => "amenity",
    }
}

string_enum! {
    /// Lifecycle status of a Listing.
    ListingStatus {
        /// On the market.
        Available => "available",
        /// An offer has been accepted.
        UnderOffer => "under_offer",
        /// Sold to a buyer.
        Sold => "sold",
        /// Let to a tenant.
        Rented => "rented",
        /// Withdrawn from the market.
        OffMarket => "off_market",
    }
}

string_enum! {
    /// Lifecycle status of an Inquiry.
    InquiryStatus {
        /// Not yet handled.
        New => "new",
        /// An agent reached out.
        Contacted => "contacted",
        /// The lead is a real prospect.
        Qualified => "qualified",
        /// The lead became a deal.
        Converted => "converted",
        /// Closed without further action.
        Closed => "closed",
        /// Junk submission.
        Spam => "spam",
    }
}

string_enum! {
    /// Lifecycle status of an Account, backed by its `active` flag.
    AccountStatus {
        /// May sign in.
        Active => "active",
        /// Disabled.
        Inactive => "inactive",
    }
}

string_enum! {
    /// Kind of property.
    PropertyType {
        Apartment => "apartment",
        Villa => "villa",
        Townhouse => "townhouse",
        House => "house",
        Commercial => "commercial",
        Land => "land",
    }
}

string_enum! {
    /// Whether a listing is offered for sale or for rent.
    OfferType {
        Sale => "sale",
        Rent => "rent",
    }
}

string_enum! {
    /// What an inquiry asks for.
    InquiryType {
        Viewing => "viewing",
        Information => "information",
        PriceNegotiation => "price_negotiation",
        CallbackRequest => "callback_request",
        General => "general",
    }
}

string_enum! {
    /// Channel an inquiry arrived through.
    InquirySource {
        Website => "website",
        Mobile => "mobile",
        Referral => "referral",
        SocialMedia => "social_media",
        Advertisement => "advertisement",
    }
}

string_enum! {
    /// Console role of an account.
    Role {
        Admin => "admin",
        Agent => "agent",
        Viewer => "viewer",
    }
}

string_enum! {
    /// Icon shown next to an amenity.
    AmenityIcon {
        Wifi => "wifi",
        Car => "car",
        Gym => "gym",
        Pool => "pool",
        Security => "security",
        Garden => "garden",
    }
}

/// A property listing shown in the public catalog and the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Identifier, unique among listings.
    pub id: String,
    /// One-line headline.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Asking price (sale) or monthly rent, in whole currency units.
    pub price: u64,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// City the property is in.
    pub city: String,
    /// Neighborhood within the city.
    #[serde(default)]
    pub neighborhood: Option<String>,
    /// Kind of property.
    pub property_type: PropertyType,
    /// Sale or rent.
    #[serde(default = "default_offer")]
    pub offer: OfferType,
    /// Lifecycle status.
    #[serde(default = "default_listing_status")]
    pub status: ListingStatus,
    /// Number of bedrooms, absent for land and commercial space.
    #[serde(default)]
    pub bedrooms: Option<u8>,
    /// Number of bathrooms; half baths count as 0.5.
    #[serde(default)]
    pub bathrooms: Option<f64>,
    /// Floor area in square feet.
    #[serde(default)]
    pub area: Option<u32>,
    /// Promoted on the home page.
    #[serde(default)]
    pub featured: bool,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Date the listing was created.
    pub created_at: NaiveDate,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_offer() -> OfferType {
    OfferType::Sale
}

fn default_listing_status() -> ListingStatus {
    ListingStatus::Available
}

/// A lead submitted through the contact form or another channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    /// Identifier, unique among inquiries.
    pub id: String,
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Title of the listing asked about, if any.
    #[serde(default)]
    pub property: Option<String>,
    /// What is being asked for.
    pub inquiry_type: InquiryType,
    /// Lifecycle status.
    #[serde(default = "default_inquiry_status")]
    pub status: InquiryStatus,
    /// Channel the inquiry came through.
    pub source: InquirySource,
    /// Free-form message.
    #[serde(default)]
    pub message: String,
    /// Date the inquiry arrived.
    pub created_at: NaiveDate,
}

fn default_inquiry_status() -> InquiryStatus {
    InquiryStatus::New
}

/// A console user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Identifier, unique among accounts.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Console role.
    pub role: Role,
    /// Whether the account may sign in. Changed through the lifecycle.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Whether the email address has been confirmed.
    #[serde(default)]
    pub email_verified: bool,
    /// Date the account was created.
    pub created_at: NaiveDate,
}

fn default_active() -> bool {
    true
}

/// An amenity that listings can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    /// Identifier, unique among amenities.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Icon key.
    pub icon: AmenityIcon,
    /// Date the amenity was created.
    pub created_at: NaiveDate,
}

impl Listing {
    /// Returns a copy with the featured flag flipped.
    #[must_use]
    pub fn toggled_featured(&self) -> Self {
        Self {
            featured: !self.featured,
            ..self.clone()
        }
    }
}

impl Account {
    /// Returns "first last", the name shown in the users table.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns the status backed by the `active` flag.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        if self.active {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        }
    }

    /// Returns a copy with the email-verified flag flipped.
    #[must_use]
    pub fn toggled_email_verified(&self) -> Self {
        Self {
            email_verified: !self.email_verified,
            ..self.clone()
        }
    }

    /// Returns a copy with a new role. Roles carry no ordering constraint.
    #[must_use]
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn category(value: impl std::fmt::Display) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

impl Entity for Listing {
    fn kind(&self) -> RecordKind {
        RecordKind::Listing
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "title" => text(&self.title),
            "description" => text(&self.description),
            "price" => Some(FieldValue::Number(self.price as f64)),
            "currency" => text(&self.currency),
            "city" => text(&self.city),
            "neighborhood" => self.neighborhood.as_deref().and_then(text),
            "property_type" => category(self.property_type),
            "offer" => category(self.offer),
            "status" => category(self.status),
            "bedrooms" => self.bedrooms.map(|v| FieldValue::Number(f64::from(v))),
            "bathrooms" => self.bathrooms.map(FieldValue::Number),
            "area" => self.area.map(|v| FieldValue::Number(f64::from(v))),
            "featured" => Some(FieldValue::Bool(self.featured)),
            "slug" => text(&self.slug),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }
}

impl Entity for Inquiry {
    fn kind(&self) -> RecordKind {
        RecordKind::Inquiry
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "email" => text(&self.email),
            "phone" => self.phone.as_deref().and_then(text),
            "property" => self.property.as_deref().and_then(text),
            "inquiry_type" => category(self.inquiry_type),
            "status" => category(self.status),
            "source" => category(self.source),
            "message" => text(&self.message),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }
}

impl Entity for Account {
    fn kind(&self) -> RecordKind {
        RecordKind::Account
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "username" => text(&self.username),
            "email" => text(&self.email),
            "first_name" => text(&self.first_name),
            "last_name" => text(&self.last_name),
            "full_name" => Some(FieldValue::Text(self.full_name())),
            "role" => category(self.role),
            "active" => Some(FieldValue::Bool(self.active)),
            "status" => category(self.status()),
            "email_verified" => Some(FieldValue::Bool(self.email_verified)),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }
}

impl Entity for Amenity {
    fn kind(&self) -> RecordKind {
        RecordKind::Amenity
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "description" => text(&self.description),
            "icon" => category(self.icon),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }
}

/// Any managed record, tagged by kind.
///
/// Serialized with a `kind` tag so one JSONL file can hold every kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// A property listing.
    Listing(Listing),
    /// A lead.
    Inquiry(Inquiry),
    /// A user account.
    Account(Account),
    /// An amenity.
    Amenity(Amenity),
}

impl Record {
    /// Returns the headline shown for the record in tables.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Record::Listing(listing) => &listing.title,
            Record::Inquiry(inquiry) => &inquiry.name,
            Record::Account(account) => &account.username,
            Record::Amenity(amenity) => &amenity.name,
        }
    }

    /// Flips an unconditional boolean flag and returns the new record.
    ///
    /// Only `featured` (Listing) and `email_verified` (Account) are toggles.
    /// An account's `active` flag is its lifecycle status and goes through
    /// the transition table instead.
    ///
    /// # Errors
    ///
    /// Returns `NotToggleable` for any other field.
    pub fn toggle_flag(&self, field: &str) -> Result<Record, ValidationError> {
        match (self, field) {
            (Record::Listing(listing), "featured") => {
                Ok(Record::Listing(listing.toggled_featured()))
            }
            (Record::Account(account), "email_verified") => {
                Ok(Record::Account(account.toggled_email_verified()))
            }
            _ => Err(ValidationError::NotToggleable {
                kind: self.kind(),
                field: field.to_string(),
            }),
        }
    }
}

impl Entity for Record {
    fn kind(&self) -> RecordKind {
        match self {
            Record::Listing(_) => RecordKind::Listing,
            Record::Inquiry(_) => RecordKind::Inquiry,
            Record::Account(_) => RecordKind::Account,
            Record::Amenity(_) => RecordKind::Amenity,
        }
    }

    fn id(&self) -> &str {
        match self {
            Record::Listing(listing) => listing.id(),
            Record::Inquiry(inquiry) => inquiry.id(),
            Record::Account(account) => account.id(),
            Record::Amenity(amenity) => amenity.id(),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Record::Listing(listing) => listing.field(name),
            Record::Inquiry(inquiry) => inquiry.field(name),
            Record::Account(account) => account.field(name),
            Record::Amenity(amenity) => amenity.field(name),
        }
    }
}

impl From<Listing> for Record {
    fn from(listing: Listing) -> Self {
        Record::Listing(listing)
    }
}

impl From<Inquiry> for Record {
    fn from(inquiry: Inquiry) -> Self {
        Record::Inquiry(inquiry)
    }
}

impl From<Account> for Record {
    fn from(account: Account) -> Self {
        Record::Account(account)
    }
}

impl From<Amenity> for Record {
    fn from(amenity: Amenity) -> Self {
        Record::Amenity(amenity)
    }
}
