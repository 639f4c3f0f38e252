//! Classification literals for clubs, checklist items, accounts and friendships

literal_enum! {
    pub enum ClubCategory as "club category" {
        Study => "STUDY",
        Hobby => "HOBBY",
        Sports => "SPORTS",
        Travel => "TRAVEL",
        Culture => "CULTURE",
        Food => "FOOD",
        Party => "PARTY",
        Work => "WORK",
        Other => "OTHER",
    }
}

literal_enum! {
    /// How long a club is expected to run
    pub enum EventType as "event type" {
        OneTime => "ONE_TIME",
        ShortTerm => "SHORT_TERM",
        LongTerm => "LONG_TERM",
    }
}

literal_enum! {
    pub enum CheckListItemCategory as "checklist item category" {
        Preparation => "PREPARATION",
        Reservation => "RESERVATION",
        PreWork => "PRE_WORK",
        Etc => "ETC",
    }
}

literal_enum! {
    /// Registered account or guest joined through a single club
    pub enum MemberType as "member type" {
        Member => "MEMBER",
        Guest => "GUEST",
    }
}

literal_enum! {
    pub enum FriendStatus as "friend status" {
        Pending => "PENDING",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
    }
}
