//! 数据库结构与演示数据

/// 建表语句，按依赖顺序排列（被引用的表在前）
pub(crate) const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS City (
        Name VARCHAR(30),
        Province_State VARCHAR(30),
        Country VARCHAR(30),
        PRIMARY KEY (Name, Province_State)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Review_User (
        UserId VARCHAR(30) PRIMARY KEY,
        Name VARCHAR(30),
        CityName VARCHAR(30) NOT NULL,
        Province_State VARCHAR(30) NOT NULL,
        FOREIGN KEY (CityName, Province_State) REFERENCES City (Name, Province_State)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Follows (
        UserId1 VARCHAR(30) NOT NULL,
        UserId2 VARCHAR(30) NOT NULL,
        PRIMARY KEY (UserId1, UserId2),
        FOREIGN KEY (UserId1) REFERENCES Review_User (UserId) ON DELETE CASCADE,
        FOREIGN KEY (UserId2) REFERENCES Review_User (UserId) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Verified_User (
        UserId VARCHAR(30) PRIMARY KEY,
        VerificationNumber INTEGER NOT NULL UNIQUE,
        FOREIGN KEY (UserId) REFERENCES Review_User (UserId) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Owner (
        SIN INTEGER PRIMARY KEY,
        Name VARCHAR(30)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Postal_Area (
        PostalCode VARCHAR(7) PRIMARY KEY,
        Province_State VARCHAR(30)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Address (
        HouseNumber INTEGER,
        StreetName VARCHAR(50),
        PostalCode VARCHAR(7),
        CityName VARCHAR(30) NOT NULL,
        PRIMARY KEY (HouseNumber, StreetName, PostalCode)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Restaurant (
        BusinessNumber INTEGER PRIMARY KEY,
        HouseNumber INTEGER,
        StreetName VARCHAR(50),
        PostalCode VARCHAR(7),
        Name VARCHAR(50),
        OwnerId INTEGER,
        FOREIGN KEY (HouseNumber, StreetName, PostalCode)
            REFERENCES Address (HouseNumber, StreetName, PostalCode) ON DELETE SET NULL,
        FOREIGN KEY (PostalCode) REFERENCES Postal_Area (PostalCode),
        FOREIGN KEY (OwnerId) REFERENCES Owner (SIN) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Menu_Item_Type (
        Type VARCHAR(30) PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Offers (
        BusinessNumber INTEGER,
        Type VARCHAR(30),
        PRIMARY KEY (BusinessNumber, Type),
        FOREIGN KEY (BusinessNumber) REFERENCES Restaurant (BusinessNumber) ON DELETE CASCADE,
        FOREIGN KEY (Type) REFERENCES Menu_Item_Type (Type)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Menu_Item (
        BusinessNumber INTEGER,
        Name VARCHAR(50),
        Type VARCHAR(30) NOT NULL,
        Cost REAL,
        PRIMARY KEY (BusinessNumber, Name),
        FOREIGN KEY (BusinessNumber) REFERENCES Restaurant (BusinessNumber) ON DELETE CASCADE,
        FOREIGN KEY (Type) REFERENCES Menu_Item_Type (Type)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Review (
        ReviewNumber INTEGER PRIMARY KEY,
        Content VARCHAR(4000),
        UserId VARCHAR(30),
        FOREIGN KEY (UserId) REFERENCES Review_User (UserId) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Restaurant_Review (
        ReviewNumber INTEGER NOT NULL,
        BusinessNumber INTEGER DEFAULT -1 NOT NULL,
        AmbienceRating INTEGER,
        CleanlinessRating INTEGER,
        ServiceRating INTEGER,
        FOREIGN KEY (ReviewNumber) REFERENCES Review (ReviewNumber) ON DELETE CASCADE,
        FOREIGN KEY (BusinessNumber) REFERENCES Restaurant (BusinessNumber) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Menu_Item_Review (
        ReviewNumber INTEGER NOT NULL,
        BusinessNumber INTEGER DEFAULT -1 NOT NULL,
        MenuItemName VARCHAR(50) DEFAULT 'N/A' NOT NULL,
        PresentationRating INTEGER,
        TasteRating INTEGER,
        PortionSizeRating INTEGER,
        FOREIGN KEY (BusinessNumber, MenuItemName)
            REFERENCES Menu_Item (BusinessNumber, Name) ON DELETE CASCADE,
        FOREIGN KEY (ReviewNumber) REFERENCES Review (ReviewNumber) ON DELETE CASCADE,
        FOREIGN KEY (BusinessNumber) REFERENCES Restaurant (BusinessNumber) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Helpful_Tag (
        TagID INTEGER PRIMARY KEY,
        HelpfulnessRating INTEGER NOT NULL,
        ReviewNumber INTEGER,
        UserId VARCHAR(30),
        FOREIGN KEY (ReviewNumber) REFERENCES Review (ReviewNumber) ON DELETE SET NULL,
        FOREIGN KEY (UserId) REFERENCES Review_User (UserId) ON DELETE SET NULL
    )
    "#,
];

/// 删除顺序：引用方在前
pub(crate) const DROP_ORDER: &[&str] = &[
    "Follows",
    "Verified_User",
    "Offers",
    "Restaurant_Review",
    "Menu_Item_Review",
    "Helpful_Tag",
    "Review",
    "Menu_Item",
    "Menu_Item_Type",
    "Restaurant",
    "Postal_Area",
    "Address",
    "Owner",
    "Review_User",
    "City",
];

pub(crate) const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_review_user_id ON Review (UserId)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_review_number ON Restaurant_Review (ReviewNumber)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_review_business ON Restaurant_Review (BusinessNumber)",
    "CREATE INDEX IF NOT EXISTS idx_menu_item_review_number ON Menu_Item_Review (ReviewNumber)",
    "CREATE INDEX IF NOT EXISTS idx_menu_item_type ON Menu_Item (Type)",
];

/// 演示数据
pub(crate) const SEED_DATA: &[&str] = &[
    r#"
    INSERT INTO City (Name, Province_State, Country) VALUES
        ('Vancouver', 'British Columbia', 'Canada'),
        ('Richmond', 'British Columbia', 'Canada'),
        ('Toronto', 'Ontario', 'Canada'),
        ('Ottawa', 'Ontario', 'Canada'),
        ('Los Angeles', 'California', 'United States of America')
    "#,
    r#"
    INSERT INTO Review_User (UserId, Name, CityName, Province_State) VALUES
        ('user1', 'John', 'Toronto', 'Ontario'),
        ('user2', 'Jane', 'Los Angeles', 'California'),
        ('user3', 'Kentaro', 'Vancouver', 'British Columbia'),
        ('user4', 'Tony', 'Vancouver', 'British Columbia'),
        ('user5', 'Riley', 'Vancouver', 'British Columbia'),
        ('user6', 'ChatGPT', 'Vancouver', 'British Columbia')
    "#,
    r#"
    INSERT INTO Follows (UserId1, UserId2) VALUES
        ('user1', 'user2'),
        ('user3', 'user4'),
        ('user1', 'user3'),
        ('user4', 'user2'),
        ('user5', 'user6')
    "#,
    r#"
    INSERT INTO Verified_User (UserId, VerificationNumber) VALUES
        ('user1', 1),
        ('user2', 2),
        ('user3', 3),
        ('user4', 4),
        ('user5', 5)
    "#,
    r#"
    INSERT INTO Owner (SIN, Name) VALUES
        (123456789, 'Bob'),
        (456789123, 'Jick'),
        (789123456, 'Jick'),
        (987654321, 'Bob'),
        (654321987, 'Jane')
    "#,
    r#"
    INSERT INTO Postal_Area (PostalCode, Province_State) VALUES
        ('V6T 1Z4', 'British Columbia'),
        ('T2X 2L9', 'Alberta'),
        ('V6B 1M8', 'British Columbia'),
        ('K1A 0A9', 'Ontario'),
        ('M5V 3L9', 'Ontario')
    "#,
    r#"
    INSERT INTO Address (HouseNumber, StreetName, PostalCode, CityName) VALUES
        (601, 'W Hastings Street', 'V6B 1M8', 'Vancouver'),
        (2205, 'Lower Mall', 'V6T 1Z4', 'Vancouver'),
        (6363, 'Agronomy Road', 'V6T 1Z4', 'Vancouver'),
        (290, 'Bremner Blvd', 'M5V 3L9', 'Toronto'),
        (1, 'Wellington Street', 'K1A 0A9', 'Ottawa')
    "#,
    r#"
    INSERT INTO Restaurant (BusinessNumber, HouseNumber, StreetName, PostalCode, Name, OwnerId) VALUES
        (123, 601, 'W Hastings Street', 'V6B 1M8', 'Bob''s Generic Pizza Place', 123456789),
        (234, 2205, 'Lower Mall', 'V6T 1Z4', 'The Point', 789123456),
        (345, 6363, 'Agronomy Road', 'V6T 1Z4', 'Orchard Commons', 456789123),
        (456, 6363, 'Agronomy Road', 'V6T 1Z4', 'McDonalds', 654321987),
        (999, 1, 'Wellington Street', 'K1A 0A9', 'Bob''s Underground Food Court', 987654321),
        (909, 290, 'Bremner Blvd', 'M5V 3L9', 'Bob''s Sky High Food Court', 987654321)
    "#,
    r#"
    INSERT INTO Menu_Item_Type (Type) VALUES
        ('Pizza'),
        ('Pasta'),
        ('Burgers'),
        ('Dim Sum'),
        ('Sushi')
    "#,
    r#"
    INSERT INTO Offers (BusinessNumber, Type) VALUES
        (123, 'Pizza'),
        (234, 'Burgers'),
        (234, 'Pasta'),
        (345, 'Burgers'),
        (345, 'Dim Sum'),
        (456, 'Burgers'),
        (999, 'Dim Sum'),
        (999, 'Sushi'),
        (909, 'Pasta')
    "#,
    r#"
    INSERT INTO Menu_Item (BusinessNumber, Name, Type, Cost) VALUES
        (123, 'Pepperoni Pizza', 'Pizza', 15.00),
        (234, 'Cheeseburger', 'Burgers', 19.99),
        (234, 'Lasagna', 'Pasta', 25.00),
        (345, 'Dumplings', 'Dim Sum', 30.00),
        (999, 'Shrimp wrappers', 'Dim Sum', 7.99),
        (999, 'California Roll', 'Sushi', 4.99),
        (909, 'Premium Spaghetti', 'Pasta', 40.00)
    "#,
    r#"
    INSERT INTO Review (ReviewNumber, Content, UserId) VALUES
        (1, 'it sucks', 'user1'),
        (2, 'it tastes good', 'user3'),
        (3, 'it is too spicy', 'user6'),
        (4, 'excited to try more', 'user4'),
        (5, 'way too overpriced', 'user5'),
        (6, 'the service was okay', 'user1'),
        (7, 'restaurant smelled bad', 'user2'),
        (8, 'i can''t seem to understand why they do not have enough staff', 'user5'),
        (9, 'I really liked their service', 'user4'),
        (10, 'The environment was nice', 'user6')
    "#,
    r#"
    INSERT INTO Restaurant_Review (ReviewNumber, BusinessNumber, AmbienceRating, CleanlinessRating, ServiceRating) VALUES
        (6, 999, 3, 4, 2),
        (7, 234, 1, 2, 5),
        (8, 456, 1, 1, 1),
        (9, 234, 4, 3, 5),
        (10, 123, 5, 5, 5)
    "#,
    r#"
    INSERT INTO Menu_Item_Review (ReviewNumber, BusinessNumber, MenuItemName, PresentationRating, TasteRating, PortionSizeRating) VALUES
        (1, 999, 'Shrimp wrappers', 2, 2, 2),
        (2, 234, 'Cheeseburger', 5, 5, 5),
        (3, 345, 'Dumplings', 4, 2, 3),
        (4, 123, 'Pepperoni Pizza', 4, 3, 5),
        (5, 909, 'Premium Spaghetti', 1, 2, 1)
    "#,
    r#"
    INSERT INTO Helpful_Tag (TagID, HelpfulnessRating, ReviewNumber, UserId) VALUES
        (1, 1, 3, 'user2'),
        (2, 0, 1, 'user6'),
        (3, 1, 7, 'user4'),
        (4, 1, 7, 'user6'),
        (5, 0, 10, 'user1')
    "#,
];
