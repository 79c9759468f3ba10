use showroom_core::db::open_db_in_memory;
use showroom_core::{
    Book, BookRepository, CrudRepository, Customer, CustomerRepository, RepoError,
};

#[test]
fn save_assigns_id_and_find_by_id_reads_it_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = BookRepository::new(&conn);

    let mut book = Book::new("Dune", "Frank Herbert");
    let id = repo.save(&mut book).unwrap();

    assert_eq!(book.id, Some(id));
    assert_eq!(repo.find_by_id(id).unwrap(), Some(book));
    assert!(repo.find_by_id(id + 1).unwrap().is_none());
}

#[test]
fn save_with_id_updates_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = BookRepository::new(&conn);

    let mut book = Book::new("Dune", "F. Herbert");
    let id = repo.save(&mut book).unwrap();
    book.author = "Frank Herbert".to_string();
    assert_eq!(repo.save(&mut book).unwrap(), id);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.author, "Frank Herbert");
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn save_with_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = CustomerRepository::new(&conn);

    let mut customer = Customer {
        id: Some(77),
        ..Customer::new("Ada", "ada@example.com")
    };
    let err = repo.save(&mut customer).unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "customer",
            id: 77
        }
    ));
}

#[test]
fn find_all_is_ordered_and_save_all_assigns_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = CustomerRepository::new(&conn);

    let mut customers = vec![
        Customer::new("Ada", "ada@example.com"),
        Customer::new("Grace", "grace@example.com"),
        Customer::new("Linus", "linus@example.com"),
    ];
    assert_eq!(repo.save_all(&mut customers).unwrap(), 3);
    assert!(customers.iter().all(|c| c.id.is_some()));

    let all = repo.find_all().unwrap();
    assert_eq!(all, customers);
}

#[test]
fn exists_count_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = BookRepository::new(&conn);

    let mut first = Book::new("Neuromancer", "William Gibson");
    let mut second = Book::new("Snow Crash", "Neal Stephenson");
    let first_id = repo.save(&mut first).unwrap();
    repo.save(&mut second).unwrap();

    assert!(repo.exists_by_id(first_id).unwrap());
    assert_eq!(repo.count().unwrap(), 2);

    repo.delete_by_id(first_id).unwrap();
    assert!(!repo.exists_by_id(first_id).unwrap());

    let err = repo.delete_by_id(first_id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "book", .. }));

    assert_eq!(repo.delete_all().unwrap(), 1);
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn repositories_share_one_connection_without_interference() {
    let conn = open_db_in_memory().unwrap();
    let books = BookRepository::new(&conn);
    let customers = CustomerRepository::new(&conn);

    books.save(&mut Book::new("Dune", "Frank Herbert")).unwrap();
    customers
        .save(&mut Customer::new("Ada", "ada@example.com"))
        .unwrap();

    assert_eq!(books.count().unwrap(), 1);
    assert_eq!(customers.count().unwrap(), 1);
}

#[test]
fn failed_save_all_restores_ids_and_can_be_retried() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("CREATE UNIQUE INDEX idx_book_title ON book (title);")
        .unwrap();
    let repo = BookRepository::new(&conn);

    let mut books = vec![
        Book::new("Dune", "Frank Herbert"),
        Book::new("Dune", "Denis Villeneuve"),
    ];
    let err = repo.save_all(&mut books).unwrap_err();

    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert_eq!(repo.count().unwrap(), 0);
    assert!(books.iter().all(|book| book.id.is_none()));

    books[1].title = "Dune Messiah".to_string();
    assert_eq!(repo.save_all(&mut books).unwrap(), 2);
    assert_eq!(repo.find_all().unwrap(), books);
}

#[test]
fn save_all_runs_inside_an_open_transaction() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("CREATE UNIQUE INDEX idx_book_title ON book (title);")
        .unwrap();

    let tx = conn.transaction().unwrap();
    {
        let repo = BookRepository::new(&tx);
        repo.save(&mut Book::new("Neuromancer", "William Gibson"))
            .unwrap();

        let mut batch = vec![Book::new("Snow Crash", "Neal Stephenson")];
        assert_eq!(repo.save_all(&mut batch).unwrap(), 1);

        let mut failing = vec![
            Book::new("Anathem", "Neal Stephenson"),
            Book::new("Neuromancer", "W. Gibson"),
        ];
        repo.save_all(&mut failing).unwrap_err();
        assert_eq!(repo.count().unwrap(), 2);
    }
    tx.commit().unwrap();

    let titles: Vec<_> = BookRepository::new(&conn)
        .find_all()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, vec!["Neuromancer", "Snow Crash"]);
}
